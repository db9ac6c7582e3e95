use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::embed::Reply;
use crate::links;
use crate::oembed::MetadataSource;
use crate::platform::{ChatTransport, IncomingMessage, OutgoingReply, ReplyReference};

/// Answers TikTok short links with a preview card.
/// Holds nothing mutable, so one instance serves every event concurrently.
pub struct PreviewHandler {
    source: Arc<dyn MetadataSource>,
}

impl PreviewHandler {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    /// Build the reply for a message, or `None` when there is nothing to answer.
    pub async fn reply_for(&self, own_id: u64, msg: &IncomingMessage) -> Option<OutgoingReply> {
        if msg.author_id == own_id {
            return None;
        }

        let Some(link) = links::find_short_link(&msg.text) else {
            debug!("No short link in message {}", msg.message_id);
            return None;
        };

        info!(
            "Previewing {} for message {} in channel {}",
            link, msg.message_id, msg.channel_id
        );

        let outcome = self.source.preview(link).await;
        if let Err(e) = &outcome {
            warn!("Preview of {} failed: {}", link, e);
        }

        Some(OutgoingReply {
            reply: Reply::compose(link, outcome),
            reference: ReplyReference::from(msg),
        })
    }

    pub async fn handle_message(&self, transport: &dyn ChatTransport, msg: &IncomingMessage) {
        let Some(reply) = self.reply_for(transport.current_user_id(), msg).await else {
            return;
        };

        // Nobody to tell if the reply itself fails to go out.
        if let Err(e) = transport.send_reply(reply).await {
            warn!("Failed to send reply to message {}: {:#}", msg.message_id, e);
        }
    }
}
