//! Command upload over the platform's REST API.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use slashwire_commands::CommandRegistry;
use slashwire_types::ApplicationCommand;

/// REST API base for command management.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
/// Token endpoint for the client-credentials grant.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://discord.com/api/v10/oauth2/token";
/// OAuth2 scope allowed to rewrite application commands.
const COMMANDS_SCOPE: &str = "applications.commands.update";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    Token { status: u16, body: String },

    #[error("upload of /{name} to guild {guild_id} answered {status}: {body}")]
    Api {
        name: String,
        guild_id: String,
        status: u16,
        body: String,
    },
}

/// Bearer credential returned by the client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

/// Uploads command definitions: one POST per command per guild, all under a
/// single freshly fetched token.
///
/// The registry is the sole source of definitions; the publisher never
/// invents or edits them.
pub struct CommandPublisher {
    client: Client,
    app_id: String,
    client_secret: String,
    token_endpoint: String,
    api_base: String,
}

impl CommandPublisher {
    pub fn new(app_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            app_id: app_id.into(),
            client_secret: client_secret.into(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the grant at a different token endpoint.
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Points uploads at a different API base, no trailing slash.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Pushes every definition in `registry` to every guild in `guild_ids`.
    /// Returns how many uploads were performed. Stops at the first failure;
    /// re-running after a partial upload is safe because the platform
    /// upserts commands by name.
    pub async fn publish(
        &self,
        registry: &CommandRegistry,
        guild_ids: &[String],
    ) -> Result<usize, PublishError> {
        let definitions = registry.definitions();
        if definitions.is_empty() {
            info!("[Publish] Registry holds no commands, nothing to upload");
            return Ok(0);
        }

        let token = self.fetch_token().await?;

        let mut uploaded = 0;
        for guild_id in guild_ids {
            let url = self.guild_commands_url(guild_id);
            for definition in &definitions {
                self.upload(&token, &url, guild_id, definition).await?;
                uploaded += 1;
            }
        }

        info!(
            "[Publish] Uploaded {} definition(s) across {} guild(s)",
            uploaded,
            guild_ids.len()
        );
        Ok(uploaded)
    }

    /// Exchanges the app id and secret for a bearer token scoped to command
    /// updates. The credential is opaque here: fetched, used, dropped.
    async fn fetch_token(&self) -> Result<AccessToken, PublishError> {
        let response = self
            .client
            .post(&self.token_endpoint)
            .basic_auth(&self.app_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", COMMANDS_SCOPE),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Token {
                status: status.as_u16(),
                body,
            });
        }

        let token: AccessToken = response.json().await?;
        debug!(
            "[Publish] Obtained {} token with scope {:?}, expires in {}s",
            token.token_type, token.scope, token.expires_in
        );
        Ok(token)
    }

    async fn upload(
        &self,
        token: &AccessToken,
        url: &str,
        guild_id: &str,
        definition: &ApplicationCommand,
    ) -> Result<(), PublishError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&token.access_token)
            .json(definition)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Api {
                name: definition.name.clone(),
                guild_id: guild_id.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        info!("[Publish] Registered /{} in guild {}", definition.name, guild_id);
        Ok(())
    }

    fn guild_commands_url(&self, guild_id: &str) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.api_base, self.app_id, guild_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_commands_url() {
        let publisher = CommandPublisher::new("810123456789", "hunter2");
        assert_eq!(
            publisher.guild_commands_url("290926798626357999"),
            "https://discord.com/api/v10/applications/810123456789/guilds/290926798626357999/commands"
        );
    }

    #[test]
    fn test_api_base_override() {
        let publisher =
            CommandPublisher::new("app", "secret").with_api_base("http://127.0.0.1:9999/api");
        assert_eq!(
            publisher.guild_commands_url("1"),
            "http://127.0.0.1:9999/api/applications/app/guilds/1/commands"
        );
    }

    #[test]
    fn test_access_token_decodes() {
        let token: AccessToken = serde_json::from_str(
            r#"{
                "access_token": "6qrZcUqja7812RVdnEKjpzOL4CvHBFG",
                "token_type": "Bearer",
                "expires_in": 604800,
                "scope": "applications.commands.update"
            }"#,
        )
        .unwrap();

        assert_eq!(token.access_token, "6qrZcUqja7812RVdnEKjpzOL4CvHBFG");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 604800);
        assert_eq!(token.scope, "applications.commands.update");
    }
}
