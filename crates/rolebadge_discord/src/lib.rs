//! Discord adapter for the rolebadge bot.
//!
//! Connects the gateway to the [`rolebadge_core::Reconciler`] and exposes the
//! admin slash commands that manage role badges.
//!
//! # Architecture
//!
//! - [`BadgeHandler`] - serenity event handler for member updates and interactions
//! - [`AdminCommands`] - platform-neutral command logic over a badge store
//! - [`SerenityRenamer`] - nickname changes through the Discord HTTP API
//! - [`RolebadgeBot`] - client lifecycle and graceful shutdown
//!
//! # Example
//!
//! ```no_run
//! use rolebadge_core::MemoryBadgeStore;
//! use rolebadge_discord::{AdminCommands, CommandSettings, RolebadgeBot};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryBadgeStore::new());
//! let commands = Arc::new(AdminCommands::new(store.clone(), CommandSettings::default()));
//! let bot = RolebadgeBot::new("token", store, commands).await?;
//! bot.start().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bot;
mod commands;
mod config;
mod cooldown;
mod error;
mod handler;
mod interactions;
mod members;
mod observability;
mod renamer;

pub use bot::RolebadgeBot;
pub use commands::{
    ADD_ROLE_BADGE, AdminCommands, BadgeListing, CommandReply, Invocation, Invoker,
    LIST_ROLE_BADGES, REMOVE_ROLE_BADGE, ReplyBody,
};
pub use config::{BotConfig, CommandSettings, LoggingConfig};
pub use cooldown::Cooldown;
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::BadgeHandler;
pub use interactions::{command_definitions, invoker, parse_invocation, respond};
pub use members::{
    i64_to_snowflake, member_snapshot, role_positions, snapshot_from_parts, snowflake_to_i64,
};
pub use observability::init_tracing;
pub use renamer::{SerenityRenamer, classify_rename_error};
