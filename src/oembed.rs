use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::{HttpConfig, OEmbedConfig};
use crate::links;

/// Anything that can go wrong between a matched short link and its metadata.
/// The `Display` text ends up in the reply, so keep it short.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("bad url: {0}")]
    BadUrl(#[from] url::ParseError),
    #[error("get: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(u16),
    #[error("no video id found in redirect")]
    NoVideoId,
    #[error("bad json: {0}")]
    BadJson(#[from] serde_json::Error),
}

/// oEmbed payload. Absent or null fields are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OEmbed {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_height: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Turns a short link into oEmbed metadata.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn preview(&self, short_link: &str) -> Result<OEmbed, PreviewError>;
}

pub struct OEmbedClient {
    /// Never follows redirects: the 301 itself is what we are after.
    resolver: reqwest::Client,
    fetcher: reqwest::Client,
    endpoint: Url,
}

impl OEmbedClient {
    pub fn new(http: &HttpConfig, oembed: &OEmbedConfig) -> anyhow::Result<Self> {
        let resolver = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .redirect(Policy::none())
            .timeout(http.timeout())
            .build()
            .context("Failed to build redirect resolver client")?;

        let fetcher = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .timeout(http.timeout())
            .build()
            .context("Failed to build oEmbed client")?;

        let endpoint = Url::parse(&oembed.endpoint)
            .with_context(|| format!("Invalid oEmbed endpoint: {}", oembed.endpoint))?;

        Ok(Self {
            resolver,
            fetcher,
            endpoint,
        })
    }

    /// Follow one hop of the short link by hand and build the oEmbed request
    /// URL for the video page it points at.
    pub async fn resolve(&self, short_link: &str) -> Result<Url, PreviewError> {
        let url = Url::parse(short_link)?;

        debug!("Resolving short link: {}", url);
        let response = self.resolver.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::MOVED_PERMANENTLY {
            return Err(PreviewError::UnexpectedResponse(status.as_u16()));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // Drain the redirect body so the connection can go back to the pool.
        response.bytes().await.ok();

        let location = location.ok_or(PreviewError::NoVideoId)?;
        let page = links::find_video_page(&location).ok_or(PreviewError::NoVideoId)?;

        let mut oembed = self.endpoint.clone();
        oembed.query_pairs_mut().append_pair("url", page);
        Ok(oembed)
    }

    pub async fn fetch(&self, url: Url) -> Result<OEmbed, PreviewError> {
        debug!("Fetching oEmbed metadata: {}", url);
        let response = self.fetcher.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("oEmbed endpoint answered {}, decoding body anyway", status);
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MetadataSource for OEmbedClient {
    async fn preview(&self, short_link: &str) -> Result<OEmbed, PreviewError> {
        let url = self.resolve(short_link).await?;
        self.fetch(url).await
    }
}
