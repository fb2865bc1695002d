//! Diesel-backed badge store.

use crate::schema::role_badges;
use crate::{NewRoleBadgeBuilder, RoleBadgeRow, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use rolebadge_core::{BadgeMapping, BadgeStore};
use rolebadge_error::{StorageError, StorageErrorKind, StorageResult};
use tracing::{debug, instrument};

/// Badge store persisted in SQLite.
///
/// Diesel is synchronous, so every operation checks out a pooled connection
/// on tokio's blocking thread pool. Writes are committed before the call
/// returns.
#[derive(Clone)]
pub struct DieselBadgeStore {
    pool: SqlitePool,
}

impl DieselBadgeStore {
    /// Create a store over an existing pool. Migrations must already be applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run a blocking database operation on the blocking thread pool.
    async fn with_connection<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> StorageResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get()?;
            op(&mut *pooled)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Join(e.to_string())))?
    }
}

#[async_trait]
impl BadgeStore for DieselBadgeStore {
    #[instrument(skip(self, badge), fields(badge_len = badge.len()))]
    async fn upsert(&self, guild_id: i64, role_id: i64, badge: &str) -> StorageResult<()> {
        debug!("Upserting role badge");
        let new_badge = NewRoleBadgeBuilder::default()
            .guild_id(guild_id)
            .role_id(role_id)
            .badge(Some(badge.to_string()))
            .build()
            .map_err(|e| StorageError::new(StorageErrorKind::Query(e.to_string())))?;

        self.with_connection(move |conn| {
            diesel::insert_into(role_badges::table)
                .values(&new_badge)
                .on_conflict((role_badges::guild_id, role_badges::role_id))
                .do_update()
                .set(role_badges::badge.eq(excluded(role_badges::badge)))
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn lookup(&self, guild_id: i64, role_id: i64) -> StorageResult<Option<String>> {
        let badge = self
            .with_connection(move |conn| {
                let badge = role_badges::table
                    .filter(role_badges::guild_id.eq(guild_id))
                    .filter(role_badges::role_id.eq(role_id))
                    .select(role_badges::badge)
                    .first::<Option<String>>(conn)
                    .optional()?;
                Ok(badge.flatten())
            })
            .await?;

        debug!(found = badge.is_some(), "Looked up role badge");
        Ok(badge.filter(|b| !b.is_empty()))
    }

    #[instrument(skip(self))]
    async fn list(&self, guild_id: i64) -> StorageResult<Vec<BadgeMapping>> {
        let rows = self
            .with_connection(move |conn| {
                Ok(role_badges::table
                    .filter(role_badges::guild_id.eq(guild_id))
                    .order(role_badges::role_id.asc())
                    .select(RoleBadgeRow::as_select())
                    .load(conn)?)
            })
            .await?;

        debug!(count = rows.len(), "Listed role badges");
        Ok(rows.into_iter().map(BadgeMapping::from).collect())
    }

    #[instrument(skip(self))]
    async fn remove(&self, guild_id: i64, role_id: i64) -> StorageResult<bool> {
        let deleted = self
            .with_connection(move |conn| {
                Ok(diesel::delete(
                    role_badges::table
                        .filter(role_badges::guild_id.eq(guild_id))
                        .filter(role_badges::role_id.eq(role_id)),
                )
                .execute(conn)?)
            })
            .await?;

        debug!(deleted, "Removed role badge");
        Ok(deleted > 0)
    }
}
