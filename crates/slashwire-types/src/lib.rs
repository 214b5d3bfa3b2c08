//! Discord object model for slashwire.
//!
//! Pure data shapes mirroring the platform's interactions API, with no
//! behavior beyond constructors and serde. Serialization is sparse: fields
//! left unset never appear in the output, and `Some(vec![])` stays distinct
//! from `None`.
//!
//! Integer-coded wire enums are transparent newtypes with associated
//! constants, so values the platform adds later still decode instead of
//! failing the whole payload.

pub mod command;
pub mod component;
pub mod embed;
pub mod interaction;
pub mod message;
pub mod response;

pub use command::{
    ApplicationCommand, ApplicationCommandOption, ApplicationCommandOptionChoice,
    ApplicationCommandOptionType, ApplicationCommandType,
};
pub use component::{ButtonStyle, Component, ComponentType, SelectOption};
pub use embed::{
    Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedProvider, EmbedThumbnail,
    EmbedVideo,
};
pub use interaction::{Interaction, InteractionData, InteractionDataOption, InteractionType};
pub use message::{
    AllowedMentionType, AllowedMentions, GuildMember, Message, MessageReference, User,
};
pub use response::{CallbackData, InteractionCallbackType, InteractionResponse, MessageFlags};
