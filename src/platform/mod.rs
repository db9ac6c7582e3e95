pub mod discord;

use anyhow::Result;
use async_trait::async_trait;

use crate::embed::Reply;

/// A message received from the chat platform
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform-specific message ID
    pub message_id: u64,
    /// Author user ID
    pub author_id: u64,
    pub channel_id: u64,
    /// Absent for direct messages
    pub guild_id: Option<u64>,
    /// The message text
    pub text: String,
}

/// Points a reply at the message it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyReference {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

impl From<&IncomingMessage> for ReplyReference {
    fn from(msg: &IncomingMessage) -> Self {
        Self {
            message_id: msg.message_id,
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub reply: Reply,
    pub reference: ReplyReference,
}

/// The live session a handler talks back through.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// ID of the bot account this session is logged in as.
    fn current_user_id(&self) -> u64;

    async fn send_reply(&self, reply: OutgoingReply) -> Result<()>;
}
