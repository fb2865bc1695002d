//! SQLite persistence for rolebadge.
//!
//! Badges live in a single `role_badges` table keyed by `(guild_id, role_id)`.
//! The schema is created by embedded migrations; call [`run_migrations`] once
//! at startup before handing the pool to [`DieselBadgeStore`].

#![warn(missing_docs)]

mod config;
mod connection;
mod models;
/// Diesel table definitions.
pub mod schema;
mod store;

pub use config::DatabaseConfig;
pub use connection::{MIGRATIONS, SqlitePool, create_pool, run_migrations};
pub use models::{NewRoleBadge, NewRoleBadgeBuilder, RoleBadgeRow};
pub use store::DieselBadgeStore;
