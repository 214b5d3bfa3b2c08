//! Outbound response envelopes.
//!
//! Every webhook reply is an [`InteractionResponse`]: a callback type plus
//! optional data. Serialization is sparse so the wire form of a PONG is
//! exactly `{"type":1}`.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::Component;
use crate::embed::Embed;
use crate::message::AllowedMentions;

/// How the platform should treat the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionCallbackType(pub u8);

impl InteractionCallbackType {
    /// Only valid reply to a PING.
    pub const PONG: Self = Self(1);
    pub const CHANNEL_MESSAGE_WITH_SOURCE: Self = Self(4);
    pub const DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE: Self = Self(5);
    pub const DEFERRED_UPDATE_MESSAGE: Self = Self(6);
    pub const UPDATE_MESSAGE: Self = Self(7);
    pub const APPLICATION_COMMAND_AUTOCOMPLETE_RESULT: Self = Self(8);
    pub const MODAL: Self = Self(9);
}

/// Bit flags attached to an outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageFlags(pub u64);

impl MessageFlags {
    /// Message is visible only to the invoking user.
    pub const EPHEMERAL: Self = Self(1 << 6);
    /// Suppress link-preview embeds on the message.
    pub const SUPPRESS_EMBEDS: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MessageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Message body of a callback. Everything is optional; absent fields are
/// omitted from the wire entirely, which the platform treats differently
/// from present-but-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    /// Modal id, only for MODAL callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Modal title, only for MODAL callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CallbackData {
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Message content visible only to the invoking user.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Self::default()
        }
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }
}

/// The envelope written back over the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CallbackData>,
}

impl InteractionResponse {
    /// Liveness acknowledgement; carries no data.
    pub fn pong() -> Self {
        Self {
            kind: InteractionCallbackType::PONG,
            data: None,
        }
    }

    /// An immediate channel message.
    pub fn channel_message(data: CallbackData) -> Self {
        Self {
            kind: InteractionCallbackType::CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(data),
        }
    }

    /// An immediate ephemeral text reply.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self::channel_message(CallbackData::ephemeral(text))
    }

    /// Acknowledge now, reply later over the follow-up endpoint.
    pub fn deferred() -> Self {
        Self {
            kind: InteractionCallbackType::DEFERRED_CHANNEL_MESSAGE_WITH_SOURCE,
            data: None,
        }
    }
}
