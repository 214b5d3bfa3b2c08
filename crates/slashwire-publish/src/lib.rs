//! Publishes registered command definitions to the platform.
//!
//! Sits entirely outside the request path: reads definitions from the
//! registry, exchanges app credentials for a bearer token, and uploads each
//! definition to every configured guild. Straight request and response, no
//! retry, no stored state.

pub mod publisher;

pub use publisher::{
    AccessToken, CommandPublisher, DEFAULT_API_BASE, DEFAULT_TOKEN_ENDPOINT, PublishError,
};
