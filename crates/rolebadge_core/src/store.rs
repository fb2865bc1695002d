//! Badge store interface.

use async_trait::async_trait;
use derive_getters::Getters;
use rolebadge_error::StorageResult;
use serde::{Deserialize, Serialize};

/// One administrator-configured badge for a guild role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct BadgeMapping {
    guild_id: i64,
    role_id: i64,
    badge: Option<String>,
}

impl BadgeMapping {
    /// Create a mapping.
    pub fn new(guild_id: i64, role_id: i64, badge: Option<String>) -> Self {
        Self {
            guild_id,
            role_id,
            badge,
        }
    }

    /// The badge if one is visibly configured.
    pub fn visible_badge(&self) -> Option<&str> {
        self.badge.as_deref().filter(|b| !b.is_empty())
    }
}

/// Durable mapping from (guild, role) to a badge.
///
/// Implementations must be safe to call concurrently; an upsert is a full
/// replace, so the last committed write for a key wins.
#[async_trait]
pub trait BadgeStore: Send + Sync {
    /// Insert or replace the badge for a role.
    async fn upsert(&self, guild_id: i64, role_id: i64, badge: &str) -> StorageResult<()>;

    /// Badge configured for a role. Missing rows and empty badges both yield `None`.
    async fn lookup(&self, guild_id: i64, role_id: i64) -> StorageResult<Option<String>>;

    /// All mappings of a guild, ordered by role id.
    async fn list(&self, guild_id: i64) -> StorageResult<Vec<BadgeMapping>>;

    /// Delete the badge for a role. Returns whether a mapping existed.
    async fn remove(&self, guild_id: i64, role_id: i64) -> StorageResult<bool>;
}
