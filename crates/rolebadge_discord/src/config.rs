//! Bot configuration loaded from TOML.

use derive_getters::Getters;
use rolebadge_database::DatabaseConfig;
use rolebadge_error::{ConfigError, RolebadgeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Top-level bot configuration.
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct BotConfig {
    /// Badge store location and pooling
    #[serde(default)]
    #[builder(default)]
    database: DatabaseConfig,
    /// Admin command behaviour
    #[serde(default)]
    #[builder(default)]
    commands: CommandSettings,
    /// Log output
    #[serde(default)]
    #[builder(default)]
    logging: LoggingConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> RolebadgeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?)
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// Returns whether the file was found alongside the configuration.
    pub fn load_or_default(path: impl AsRef<Path>) -> RolebadgeResult<(Self, bool)> {
        if path.as_ref().exists() {
            Ok((Self::from_file(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Replace the database url, e.g. from `DATABASE_URL`.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database = self.database.with_url(url);
        self
    }
}

/// Settings for the admin slash commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CommandSettings {
    /// Listings a user may request per cooldown window
    #[serde(default = "default_list_cooldown_uses")]
    list_cooldown_uses: u32,
    /// Length of the listing cooldown window, in seconds
    #[serde(default = "default_list_cooldown_secs")]
    list_cooldown_secs: u64,
    /// How long generic failure replies stay visible, in seconds
    #[serde(default = "default_error_dismiss_secs")]
    error_dismiss_secs: u64,
    /// How long permission and cooldown replies stay visible, in seconds
    #[serde(default = "default_notice_dismiss_secs")]
    notice_dismiss_secs: u64,
    /// Longest accepted badge, in characters
    #[serde(default = "default_max_badge_len")]
    max_badge_len: u16,
}

impl CommandSettings {
    /// Listing cooldown window.
    pub fn list_cooldown(&self) -> Duration {
        Duration::from_secs(self.list_cooldown_secs)
    }

    /// Visibility of generic failure replies.
    pub fn error_dismiss(&self) -> Duration {
        Duration::from_secs(self.error_dismiss_secs)
    }

    /// Visibility of permission and cooldown replies.
    pub fn notice_dismiss(&self) -> Duration {
        Duration::from_secs(self.notice_dismiss_secs)
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            list_cooldown_uses: default_list_cooldown_uses(),
            list_cooldown_secs: default_list_cooldown_secs(),
            error_dismiss_secs: default_error_dismiss_secs(),
            notice_dismiss_secs: default_notice_dismiss_secs(),
            max_badge_len: default_max_badge_len(),
        }
    }
}

fn default_list_cooldown_uses() -> u32 {
    1
}

fn default_list_cooldown_secs() -> u64 {
    5
}

fn default_error_dismiss_secs() -> u64 {
    7
}

fn default_notice_dismiss_secs() -> u64 {
    5
}

// Discord nicknames are capped at 32 characters
fn default_max_badge_len() -> u16 {
    32
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
