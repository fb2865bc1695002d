//! Database connection utilities.

use crate::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rolebadge_error::{StorageError, StorageErrorKind, StorageResult};
use tracing::instrument;

/// Pool of SQLite connections.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Per-connection pragmas applied whenever the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the SQLite database described by `config`.
///
/// File databases are switched to WAL journaling so readers never block the
/// writer. An in-memory database lives and dies with its connection, so its
/// pool holds exactly one connection that is never recycled.
///
/// # Errors
///
/// Returns an error if the pool cannot open its first connection.
#[instrument(name = "database.create_pool", skip(config), fields(url = %config.url()))]
pub fn create_pool(config: &DatabaseConfig) -> StorageResult<SqlitePool> {
    tracing::debug!("Creating SQLite connection pool");
    let manager = ConnectionManager::<SqliteConnection>::new(config.url());
    let builder = if config.is_in_memory() {
        Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
    } else {
        Pool::builder().max_size(*config.max_connections())
    };

    let pool = builder
        .connection_customizer(Box::new(ConnectionPragmas {
            busy_timeout_ms: *config.busy_timeout_ms(),
        }))
        .build(manager)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create connection pool");
            StorageError::new(StorageErrorKind::Connection(e.to_string()))
        })?;

    if !config.is_in_memory() {
        let mut pooled = pool.get()?;
        let conn: &mut SqliteConnection = &mut pooled;
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
    }

    Ok(pool)
}

/// Apply any pending schema migrations.
///
/// Returns the number of migrations that ran.
#[instrument(name = "database.run_migrations", skip(pool))]
pub fn run_migrations(pool: &SqlitePool) -> StorageResult<usize> {
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        tracing::error!(error = %e, "Failed to run migrations");
        StorageError::new(StorageErrorKind::Migration(e.to_string()))
    })?;
    tracing::info!(count = applied.len(), "Database migrations applied");
    Ok(applied.len())
}
