//! Inbound interaction payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::ApplicationCommandOptionType;
use crate::component::ComponentType;
use crate::message::{GuildMember, Message, User};

/// What kind of event an inbound interaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionType(pub u8);

impl InteractionType {
    /// Liveness check from the platform; answered with PONG, never dispatched.
    pub const PING: Self = Self(1);
    pub const APPLICATION_COMMAND: Self = Self(2);
    pub const MESSAGE_COMPONENT: Self = Self(3);
    pub const APPLICATION_COMMAND_AUTOCOMPLETE: Self = Self(4);
    pub const MODAL_SUBMIT: Self = Self(5);
}

/// A single inbound event from the platform: a user invoking a command or
/// interacting with a UI component.
///
/// Decoded fresh from the verified request body for each request and
/// discarded once the response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Snowflake id of this interaction, as the platform sends it: a string.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Invoking guild member; present for guild interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    /// Invoking user; present for DM interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Continuation token for follow-up calls.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_version")]
    pub version: u8,
    /// The message a component interaction was attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
}

fn default_version() -> u8 {
    1
}

/// Command payload carried by APPLICATION_COMMAND, MESSAGE_COMPONENT and
/// MODAL_SUBMIT interactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the invoked command, used as the dispatch key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    /// Component id, for MESSAGE_COMPONENT and MODAL_SUBMIT interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<ComponentType>,
    /// Selected values of a select-menu component.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Resolved users/members/channels for USER and MESSAGE commands.
    /// Pass-through, not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
    /// Target of a USER or MESSAGE context-menu command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

/// One argument the user supplied when invoking a command. Sub-commands nest
/// their own options and carry no value themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ApplicationCommandOptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
}

impl Interaction {
    /// Name of the invoked command, if this interaction carries one.
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_application_command() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "846462639134605312",
            "application_id": "810123456789",
            "type": 2,
            "token": "A_UNIQUE_TOKEN",
            "version": 1,
            "guild_id": "290926798626357999",
            "channel_id": "645027906669510667",
            "data": {
                "id": "771825006014889984",
                "name": "greet",
                "options": [
                    { "name": "who", "type": 3, "value": "moon" }
                ]
            },
            "member": {
                "user": {
                    "id": "53908232506183680",
                    "username": "Mason",
                    "discriminator": "1337"
                },
                "roles": ["539082325061836999"],
                "joined_at": "2017-03-13T19:19:14.040000+00:00",
                "deaf": false,
                "mute": false
            }
        }))
        .unwrap();

        assert_eq!(interaction.kind, InteractionType::APPLICATION_COMMAND);
        assert_eq!(interaction.command_name(), Some("greet"));
        let data = interaction.data.unwrap();
        assert_eq!(data.options.len(), 1);
        assert_eq!(data.options[0].name, "who");
        assert_eq!(data.options[0].value, Some(json!("moon")));
        assert_eq!(
            interaction.member.unwrap().user.unwrap().username,
            "Mason"
        );
    }

    #[test]
    fn test_decode_ping() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "1",
            "application_id": "2",
            "type": 1,
            "token": "tok",
            "version": 1
        }))
        .unwrap();

        assert_eq!(interaction.kind, InteractionType::PING);
        assert!(interaction.data.is_none());
        assert_eq!(interaction.command_name(), None);
    }

    #[test]
    fn test_unknown_interaction_type_still_decodes() {
        // Platform additions must not break decoding of the envelope.
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "1",
            "type": 42,
            "token": "tok"
        }))
        .unwrap();

        assert_eq!(interaction.kind, InteractionType(42));
    }

    #[test]
    fn test_command_name_absent_without_data_name() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "1",
            "type": 3,
            "token": "tok",
            "data": { "custom_id": "click_one", "component_type": 2 }
        }))
        .unwrap();

        assert_eq!(interaction.command_name(), None);
        assert_eq!(
            interaction.data.unwrap().custom_id.as_deref(),
            Some("click_one")
        );
    }
}
