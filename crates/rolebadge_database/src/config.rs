//! Database settings.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Where the badge store lives and how connections are pooled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct DatabaseConfig {
    /// SQLite database path, or `:memory:`
    #[serde(default = "default_url")]
    url: String,
    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    /// How long a connection waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    busy_timeout_ms: u32,
}

impl DatabaseConfig {
    /// Settings for the database at `url` with default pooling.
    pub fn new(url: impl Into<String>) -> Self {
        Self::default().with_url(url)
    }

    /// Whether the url points at a private in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.url == ":memory:"
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_url() -> String {
    "rolebadge.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_busy_timeout_ms() -> u32 {
    5_000
}
