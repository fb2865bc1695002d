//! Rolebadge - decorates member nicknames with the badge of their top role.

use clap::Parser;
use rolebadge_core::{BadgeStore, MemoryBadgeStore};
use rolebadge_database::{DieselBadgeStore, create_pool, run_migrations};
use rolebadge_discord::{
    AdminCommands, BotConfig, DiscordError, DiscordErrorKind, RolebadgeBot, init_tracing,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(name = "rolebadge")]
#[command(about = "Discord bot that shows role badges in member nicknames")]
#[command(version)]
struct Args {
    /// Path to bot configuration file
    #[arg(short, long, default_value = "rolebadge.toml")]
    config: PathBuf,

    /// Database URL for the badge store
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    discord_token: Option<String>,

    /// Validate configuration and open the store, then exit
    #[arg(long)]
    dry_run: bool,

    /// Keep badges in memory only (lost on restart)
    #[arg(long)]
    memory: bool,
}

fn open_store(config: &BotConfig, memory: bool) -> Result<Arc<dyn BadgeStore>, DiscordError> {
    if memory {
        warn!("Using in-memory badge store - badges will not survive a restart");
        return Ok(Arc::new(MemoryBadgeStore::new()));
    }

    let pool = create_pool(config.database())?;
    let applied = run_migrations(&pool)?;
    info!(
        url = %config.database().url(),
        migrations_applied = applied,
        "Badge store ready"
    );
    Ok(Arc::new(DieselBadgeStore::new(pool)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (mut config, found) = BotConfig::load_or_default(&args.config)?;
    if let Some(url) = args.database_url {
        config = config.with_database_url(url);
    }

    init_tracing(config.logging());
    info!("Starting rolebadge");
    if found {
        info!(config_file = ?args.config, "Configuration loaded");
    } else {
        info!(config_file = ?args.config, "No configuration file, using defaults");
    }

    let store = open_store(&config, args.memory)?;

    if args.dry_run {
        info!("DRY RUN MODE - configuration and store validated, exiting");
        return Ok(());
    }

    let token = args
        .discord_token
        .ok_or_else(|| DiscordError::new(DiscordErrorKind::MissingToken))?;

    let commands = Arc::new(AdminCommands::new(store.clone(), config.commands().clone()));
    let bot = RolebadgeBot::new(&token, store, commands).await?;
    bot.start().await?;

    Ok(())
}
