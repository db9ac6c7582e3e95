use serde::Serialize;

use crate::oembed::{OEmbed, PreviewError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Platform-neutral preview card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyEmbed {
    pub url: String,
    pub title: String,
    pub author: EmbedAuthor,
    pub image: EmbedImage,
}

/// What gets posted back: either an embed with no text, or error text with
/// no embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub content: String,
    pub embed: Option<ReplyEmbed>,
}

impl Reply {
    pub fn compose(short_link: &str, outcome: Result<OEmbed, PreviewError>) -> Self {
        match outcome {
            Ok(meta) => Self {
                content: String::new(),
                embed: Some(ReplyEmbed {
                    url: short_link.to_string(),
                    title: meta.title,
                    author: EmbedAuthor {
                        name: meta.author_name,
                        url: meta.author_url,
                    },
                    image: EmbedImage {
                        url: meta.thumbnail_url,
                        width: meta.thumbnail_width,
                        height: meta.thumbnail_height,
                    },
                }),
            },
            Err(e) => Self {
                content: format!("error: {}", e),
                embed: None,
            },
        }
    }
}
