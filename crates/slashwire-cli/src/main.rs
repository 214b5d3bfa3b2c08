mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use slashwire_commands::{CommandRegistry, InteractionDispatcher};
use slashwire_gateway::GatewayState;
use slashwire_publish::CommandPublisher;
use slashwire_types::{ApplicationCommand, InteractionResponse};
use slashwire_verify::RequestAuthenticator;

use config::Config;

#[derive(Parser)]
#[command(name = "slashwire")]
#[command(about = "Signed interactions webhook gateway for Discord slash commands")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactions webhook
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Upload the registered command definitions to the configured guilds
    Publish,
    /// Check whether a local gateway is up
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            serve(config).await?;
        }
        Commands::Publish => publish(config).await?,
        Commands::Status => status(config).await,
    }

    Ok(())
}

/// The built-in demo registry: `/hello` answers an ephemeral greeting.
/// Applications embedding the gateway build their own registry instead.
fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register_fn(
        ApplicationCommand::new("hello", "Hello world"),
        |_| async { Ok(InteractionResponse::ephemeral("Hello")) },
    );
    registry
}

async fn serve(config: Config) -> Result<()> {
    let public_key = config
        .public_key
        .as_deref()
        .context("SLASHWIRE_PUBLIC_KEY is required to serve")?;
    let authenticator =
        RequestAuthenticator::from_hex(public_key).context("invalid SLASHWIRE_PUBLIC_KEY")?;

    let registry = Arc::new(build_registry());
    info!("[Cli] Serving {} registered command(s)", registry.len());

    // The platform abandons webhook replies after ~3s; cap handlers under it.
    let dispatcher =
        InteractionDispatcher::new(registry).with_handler_timeout(Duration::from_secs(2));

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;
    let state = GatewayState::new(authenticator, dispatcher);
    slashwire_gateway::serve(addr, &config.interactions_path, state).await
}

async fn publish(config: Config) -> Result<()> {
    let app_id = config
        .app_id
        .context("SLASHWIRE_APP_ID is required to publish")?;
    let client_secret = config
        .client_secret
        .context("SLASHWIRE_CLIENT_SECRET is required to publish")?;
    if config.guild_ids.is_empty() {
        anyhow::bail!("SLASHWIRE_GUILD_IDS is empty, nowhere to publish");
    }

    let registry = build_registry();
    let mut publisher = CommandPublisher::new(app_id, client_secret);
    if let Some(endpoint) = config.token_endpoint {
        publisher = publisher.with_token_endpoint(endpoint);
    }
    if let Some(base) = config.api_base {
        publisher = publisher.with_api_base(base);
    }

    let uploaded = publisher.publish(&registry, &config.guild_ids).await?;
    println!(
        "Uploaded {} command definition(s) to {} guild(s)",
        uploaded,
        config.guild_ids.len()
    );
    Ok(())
}

async fn status(config: Config) {
    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{}/healthz", config.port))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            println!("slashwire is up on port {}", config.port);
        }
        _ => {
            println!("slashwire is not running on port {}", config.port);
        }
    }
}
