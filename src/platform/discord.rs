use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Context, CreateEmbed, CreateEmbedAuthor, CreateMessage, EventHandler,
    GatewayIntents, GuildId, Message, MessageId, MessageReference, Ready,
};
use tokio::signal;
use tracing::info;

use crate::embed::ReplyEmbed;
use crate::handler::PreviewHandler;
use crate::platform::{ChatTransport, IncomingMessage, OutgoingReply};

/// Serenity session seen through the platform-neutral transport interface.
struct DiscordTransport<'a> {
    ctx: &'a Context,
}

#[async_trait]
impl<'a> ChatTransport for DiscordTransport<'a> {
    fn current_user_id(&self) -> u64 {
        self.ctx.cache.current_user().id.get()
    }

    async fn send_reply(&self, reply: OutgoingReply) -> Result<()> {
        ChannelId::new(reply.reference.channel_id)
            .send_message(&self.ctx.http, build_message(&reply))
            .await
            .context("Failed to send Discord message")?;
        Ok(())
    }
}

fn build_embed(embed: &ReplyEmbed) -> CreateEmbed {
    // Discord sizes images itself; the builder has no width/height.
    CreateEmbed::new()
        .url(&embed.url)
        .title(&embed.title)
        .author(CreateEmbedAuthor::new(&embed.author.name).url(&embed.author.url))
        .image(&embed.image.url)
}

fn build_message(reply: &OutgoingReply) -> CreateMessage {
    let mut reference = MessageReference::from((
        ChannelId::new(reply.reference.channel_id),
        MessageId::new(reply.reference.message_id),
    ));
    reference.guild_id = reply.reference.guild_id.map(GuildId::new);

    let mut message = CreateMessage::new().reference_message(reference);
    if !reply.reply.content.is_empty() {
        message = message.content(&reply.reply.content);
    }
    if let Some(embed) = &reply.reply.embed {
        message = message.embed(build_embed(embed));
    }
    message
}

struct Handler {
    preview: Arc<PreviewHandler>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected to Discord as {} ({})", ready.user.name, ready.user.id);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = IncomingMessage {
            message_id: msg.id.get(),
            author_id: msg.author.id.get(),
            channel_id: msg.channel_id.get(),
            guild_id: msg.guild_id.map(|id| id.get()),
            text: msg.content,
        };

        let transport = DiscordTransport { ctx: &ctx };
        self.preview.handle_message(&transport, &incoming).await;
    }
}

/// Run the Discord gateway session until SIGINT/SIGTERM.
pub async fn run(token: &str, preview: Arc<PreviewHandler>) -> Result<()> {
    info!("Starting Discord platform...");

    let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(token, intents)
        .event_handler(Handler { preview })
        .await
        .context("Failed to create Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, closing gateway connection");
        shard_manager.shutdown_all().await;
    });

    client
        .start()
        .await
        .context("Discord gateway connection failed")?;

    info!("Discord platform stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
