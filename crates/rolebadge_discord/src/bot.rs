//! Gateway client lifecycle.

use crate::{AdminCommands, BadgeHandler, DiscordError, DiscordErrorKind, DiscordResult};
use rolebadge_core::BadgeStore;
use serenity::Client;
use serenity::all::GatewayIntents;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Role badge bot connected to the Discord gateway.
pub struct RolebadgeBot {
    client: Client,
}

impl RolebadgeBot {
    /// Gateway intents the bot needs: guild roles and member updates.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
    }

    /// Build the client. Nothing is sent to Discord until [`start`](Self::start).
    #[instrument(skip_all)]
    pub async fn new(
        token: &str,
        store: Arc<dyn BadgeStore>,
        commands: Arc<AdminCommands>,
    ) -> DiscordResult<Self> {
        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::MissingToken));
        }

        let handler = BadgeHandler::new(store, commands);
        let client = Client::builder(token, Self::intents())
            .event_handler(handler)
            .await?;

        info!("Discord client created");
        Ok(Self { client })
    }

    /// Run until the gateway closes or CTRL+C is received.
    pub async fn start(mut self) -> DiscordResult<()> {
        let shard_manager = self.client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to install CTRL+C signal handler");
                return;
            }
            info!("Shutdown signal received, stopping gracefully...");
            shard_manager.shutdown_all().await;
        });

        info!("Bot running. Press CTRL+C to shutdown.");
        self.client.start().await?;
        info!("Bot stopped");
        Ok(())
    }
}
