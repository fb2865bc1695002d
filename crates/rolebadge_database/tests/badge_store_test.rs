//! Tests for the SQLite badge store.

use rolebadge_core::BadgeStore;
use rolebadge_database::{DatabaseConfig, DieselBadgeStore, create_pool, run_migrations};
use std::sync::Arc;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> DieselBadgeStore {
    let path = dir.path().join("badges.db");
    let config = DatabaseConfig::new(path.to_string_lossy());
    let pool = create_pool(&config).expect("Pool opens");
    run_migrations(&pool).expect("Migrations apply");
    DieselBadgeStore::new(pool)
}

#[tokio::test]
async fn test_repeated_upsert_keeps_single_row() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.upsert(1, 5, "⭐").await.unwrap();
    store.upsert(1, 5, "🏆").await.unwrap();

    let listed = store.list(1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(*listed[0].role_id(), 5);
    assert_eq!(listed[0].visible_badge(), Some("🏆"));
    assert_eq!(store.lookup(1, 5).await.unwrap(), Some("🏆".to_string()));
}

#[tokio::test]
async fn test_lookup_treats_missing_and_empty_alike() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.upsert(1, 6, "").await.unwrap();

    assert_eq!(store.lookup(1, 5).await.unwrap(), None);
    assert_eq!(store.lookup(1, 6).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_only_returns_requested_guild() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.upsert(1, 9, "🔥").await.unwrap();
    store.upsert(1, 3, "🌱").await.unwrap();
    store.upsert(2, 3, "🐟").await.unwrap();

    let listed = store.list(1).await.unwrap();
    let roles: Vec<i64> = listed.iter().map(|m| *m.role_id()).collect();
    assert_eq!(roles, vec![3, 9]);
    assert!(listed.iter().all(|m| *m.guild_id() == 1));
}

#[tokio::test]
async fn test_remove_deletes_mapping() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.upsert(1, 5, "⭐").await.unwrap();

    assert!(store.remove(1, 5).await.unwrap());
    assert!(!store.remove(1, 5).await.unwrap());
    assert!(store.list(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_badges_survive_reopening() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_store(&dir);
        store.upsert(7, 8, "🛡️").await.unwrap();
    }

    let reopened = open_store(&dir);
    assert_eq!(reopened.lookup(7, 8).await.unwrap(), Some("🛡️".to_string()));
}

#[tokio::test]
async fn test_concurrent_upserts_leave_one_row() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir));

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let badge = format!("badge-{i}");
            store.upsert(1, 5, &badge).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let listed = store.list(1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].visible_badge().unwrap().starts_with("badge-"));
}

#[test]
fn test_migrations_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::new(dir.path().join("badges.db").to_string_lossy());
    let pool = create_pool(&config).unwrap();

    assert_eq!(run_migrations(&pool).unwrap(), 1);
    assert_eq!(run_migrations(&pool).unwrap(), 0);
}

#[tokio::test]
async fn test_in_memory_database_works_with_single_connection() {
    let pool = create_pool(&DatabaseConfig::new(":memory:")).unwrap();
    run_migrations(&pool).unwrap();
    let store = DieselBadgeStore::new(pool);

    store.upsert(1, 5, "⭐").await.unwrap();
    assert_eq!(store.lookup(1, 5).await.unwrap(), Some("⭐".to_string()));
}

#[test]
fn test_in_memory_connection_is_never_recycled() {
    let pool = create_pool(&DatabaseConfig::new(":memory:")).unwrap();

    assert_eq!(pool.max_size(), 1);
    assert_eq!(pool.max_lifetime(), None);
    assert_eq!(pool.idle_timeout(), None);
}

#[test]
fn test_file_database_uses_configured_pool_size() {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::new(dir.path().join("badges.db").to_string_lossy())
        .with_max_connections(3u32);
    let pool = create_pool(&config).unwrap();

    assert_eq!(pool.max_size(), 3);
}
