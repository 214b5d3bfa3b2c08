//! Application command definitions, as published to the platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level command kind. CHAT_INPUT commands are the slash commands typed
/// into the message box; USER and MESSAGE commands live in context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationCommandType(pub u8);

impl ApplicationCommandType {
    pub const CHAT_INPUT: Self = Self(1);
    pub const USER: Self = Self(2);
    pub const MESSAGE: Self = Self(3);
}

impl Default for ApplicationCommandType {
    fn default() -> Self {
        Self::CHAT_INPUT
    }
}

/// Type of a single command option (argument).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationCommandOptionType(pub u8);

impl ApplicationCommandOptionType {
    pub const SUB_COMMAND: Self = Self(1);
    pub const SUB_COMMAND_GROUP: Self = Self(2);
    pub const STRING: Self = Self(3);
    pub const INTEGER: Self = Self(4);
    pub const BOOLEAN: Self = Self(5);
    pub const USER: Self = Self(6);
    pub const CHANNEL: Self = Self(7);
    pub const ROLE: Self = Self(8);
    pub const MENTIONABLE: Self = Self(9);
    pub const NUMBER: Self = Self(10);
    pub const ATTACHMENT: Self = Self(11);
}

/// A command definition: what the application tells the platform it offers.
///
/// The `name` doubles as the dispatch key for inbound invocations, so two
/// definitions with the same name are the same command as far as routing is
/// concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCommand {
    /// Platform-assigned id, present only on commands read back from the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ApplicationCommandType>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
}

impl ApplicationCommand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            application_id: None,
            guild_id: None,
            kind: None,
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    pub fn kind(mut self, kind: ApplicationCommandType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn option(mut self, option: ApplicationCommandOption) -> Self {
        self.options.push(option);
        self
    }
}

/// A single declared option of a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCommandOption {
    #[serde(rename = "type")]
    pub kind: ApplicationCommandOptionType,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ApplicationCommandOptionChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
}

impl ApplicationCommandOption {
    pub fn new(
        kind: ApplicationCommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: None,
            choices: Vec::new(),
            options: Vec::new(),
            min_value: None,
            max_value: None,
            autocomplete: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn choice(mut self, choice: ApplicationCommandOptionChoice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A fixed choice offered for an option. The value's type must match the
/// option's declared type, which is why it stays a raw JSON value here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCommandOptionChoice {
    pub name: String,
    pub value: Value,
}
