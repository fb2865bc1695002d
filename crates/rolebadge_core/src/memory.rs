//! In-memory badge store.

use crate::{BadgeMapping, BadgeStore};
use async_trait::async_trait;
use rolebadge_error::StorageResult;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Badge store kept in process memory.
///
/// Nothing survives a restart. Used by tests and by dry runs of the bot
/// that should not touch the database.
#[derive(Debug, Default)]
pub struct MemoryBadgeStore {
    badges: RwLock<BTreeMap<(i64, i64), String>>,
}

impl MemoryBadgeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings across all guilds.
    pub async fn len(&self) -> usize {
        self.badges.read().await.len()
    }

    /// Whether the store holds no mappings.
    pub async fn is_empty(&self) -> bool {
        self.badges.read().await.is_empty()
    }
}

#[async_trait]
impl BadgeStore for MemoryBadgeStore {
    #[instrument(skip(self, badge))]
    async fn upsert(&self, guild_id: i64, role_id: i64, badge: &str) -> StorageResult<()> {
        debug!("Storing badge in memory");
        self.badges
            .write()
            .await
            .insert((guild_id, role_id), badge.to_string());
        Ok(())
    }

    async fn lookup(&self, guild_id: i64, role_id: i64) -> StorageResult<Option<String>> {
        Ok(self
            .badges
            .read()
            .await
            .get(&(guild_id, role_id))
            .filter(|badge| !badge.is_empty())
            .cloned())
    }

    async fn list(&self, guild_id: i64) -> StorageResult<Vec<BadgeMapping>> {
        Ok(self
            .badges
            .read()
            .await
            .range((guild_id, i64::MIN)..=(guild_id, i64::MAX))
            .map(|((guild_id, role_id), badge)| {
                BadgeMapping::new(*guild_id, *role_id, Some(badge.clone()))
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn remove(&self, guild_id: i64, role_id: i64) -> StorageResult<bool> {
        debug!("Removing badge from memory");
        Ok(self
            .badges
            .write()
            .await
            .remove(&(guild_id, role_id))
            .is_some())
    }
}
