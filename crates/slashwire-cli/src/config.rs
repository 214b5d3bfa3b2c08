/// Runtime configuration for the slashwire binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Hex-encoded Ed25519 public key from the developer portal
    pub public_key: Option<String>,
    /// Application id, for publishing commands
    pub app_id: Option<String>,
    /// OAuth2 client secret, for publishing commands
    pub client_secret: Option<String>,
    /// Guilds that receive published command definitions
    pub guild_ids: Vec<String>,
    /// Path the interactions webhook is mounted on
    pub interactions_path: String,
    /// Override for the OAuth2 token endpoint
    pub token_endpoint: Option<String>,
    /// Override for the REST API base
    pub api_base: Option<String>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            public_key: None,
            app_id: None,
            client_secret: None,
            guild_ids: Vec::new(),
            interactions_path: "/interactions".to_string(),
            token_endpoint: None,
            api_base: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("SLASHWIRE_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SLASHWIRE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            public_key: std::env::var("SLASHWIRE_PUBLIC_KEY").ok(),
            app_id: std::env::var("SLASHWIRE_APP_ID").ok(),
            client_secret: std::env::var("SLASHWIRE_CLIENT_SECRET").ok(),
            guild_ids: parse_guild_ids(&std::env::var("SLASHWIRE_GUILD_IDS").unwrap_or_default()),
            interactions_path: std::env::var("SLASHWIRE_INTERACTIONS_PATH")
                .unwrap_or_else(|_| "/interactions".to_string()),
            token_endpoint: std::env::var("SLASHWIRE_TOKEN_ENDPOINT").ok(),
            api_base: std::env::var("SLASHWIRE_API_BASE").ok(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Splits the comma-separated guild list, dropping blanks.
fn parse_guild_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guild_ids() {
        assert_eq!(
            parse_guild_ids("290926798626357999, 290926798626358000"),
            ["290926798626357999", "290926798626358000"]
        );
    }

    #[test]
    fn test_parse_guild_ids_skips_blanks() {
        assert_eq!(parse_guild_ids(""), Vec::<String>::new());
        assert_eq!(parse_guild_ids(" , ,123,"), ["123"]);
    }

    #[test]
    fn test_default_serves_interactions_on_8080() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.interactions_path, "/interactions");
    }
}
