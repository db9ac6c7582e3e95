mod config;
mod embed;
mod handler;
mod links;
mod oembed;
mod platform;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::handler::PreviewHandler;
use crate::oembed::OEmbedClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dustybot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let token = Config::discord_token()?;

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  oEmbed endpoint: {}", config.oembed.endpoint);
    info!("  HTTP timeout: {}s", config.http.timeout_secs);

    let source = OEmbedClient::new(&config.http, &config.oembed)?;
    let handler = Arc::new(PreviewHandler::new(Arc::new(source)));

    info!("Bot is starting...");
    platform::discord::run(&token, handler).await?;

    Ok(())
}
