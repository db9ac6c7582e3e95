use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the Discord bot token.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_http_config")]
    pub http: HttpConfig,
    #[serde(default = "default_oembed_config")]
    pub oembed: OEmbedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Sent on both outbound requests; the short link host only answers
    /// with a redirect for browser-looking clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OEmbedConfig {
    #[serde(default = "default_oembed_endpoint")]
    pub endpoint: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/14.0.2 Safari/605.1.15"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_oembed_endpoint() -> String {
    "https://www.tiktok.com/oembed".to_string()
}

fn default_http_config() -> HttpConfig {
    HttpConfig {
        user_agent: default_user_agent(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_oembed_config() -> OEmbedConfig {
    OEmbedConfig {
        endpoint: default_oembed_endpoint(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: default_http_config(),
            oembed: default_oembed_config(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }
        Ok(config)
    }

    /// Read the bot token from the environment. An unset or blank token is fatal.
    pub fn discord_token() -> Result<String> {
        let token = std::env::var(TOKEN_ENV)
            .with_context(|| format!("{} environment variable not set", TOKEN_ENV))?;
        if token.trim().is_empty() {
            anyhow::bail!("{} environment variable is empty", TOKEN_ENV);
        }
        Ok(token)
    }
}
