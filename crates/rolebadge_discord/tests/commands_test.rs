//! Tests for the admin command surface.

use async_trait::async_trait;
use rolebadge_core::{BadgeMapping, BadgeStore, MemoryBadgeStore};
use rolebadge_discord::{
    AdminCommands, BadgeListing, CommandReply, CommandSettings, Invocation, Invoker, ReplyBody,
};
use rolebadge_error::{StorageError, StorageErrorKind, StorageResult};
use std::sync::Arc;
use std::time::Duration;

const GUILD: i64 = 900;
const USER: i64 = 11;

struct OfflineStore;

#[async_trait]
impl BadgeStore for OfflineStore {
    async fn upsert(&self, _: i64, _: i64, _: &str) -> StorageResult<()> {
        Err(StorageError::new(StorageErrorKind::Connection("offline".into())))
    }

    async fn lookup(&self, _: i64, _: i64) -> StorageResult<Option<String>> {
        Err(StorageError::new(StorageErrorKind::Connection("offline".into())))
    }

    async fn list(&self, _: i64) -> StorageResult<Vec<BadgeMapping>> {
        Err(StorageError::new(StorageErrorKind::Connection("offline".into())))
    }

    async fn remove(&self, _: i64, _: i64) -> StorageResult<bool> {
        Err(StorageError::new(StorageErrorKind::Connection("offline".into())))
    }
}

fn admin() -> Invoker {
    Invoker::new(USER, Some(GUILD), true)
}

fn member() -> Invoker {
    Invoker::new(USER, Some(GUILD), false)
}

fn commands_over(store: Arc<dyn BadgeStore>) -> AdminCommands {
    AdminCommands::new(store, CommandSettings::default())
}

fn text(reply: &CommandReply) -> &str {
    match reply.body() {
        ReplyBody::Text(content) => content,
        ReplyBody::Listing(listing) => panic!("expected text reply, got {listing:?}"),
    }
}

fn listing(reply: &CommandReply) -> &BadgeListing {
    match reply.body() {
        ReplyBody::Listing(listing) => listing,
        ReplyBody::Text(content) => panic!("expected listing, got {content:?}"),
    }
}

#[tokio::test]
async fn test_admin_sets_badge() {
    let store = Arc::new(MemoryBadgeStore::new());
    let commands = commands_over(store.clone());

    let reply = commands
        .dispatch(
            &admin(),
            Invocation::AddRoleBadge {
                role_id: 5,
                badge: "  🦊 ".to_string(),
            },
        )
        .await;

    assert_eq!(text(&reply), "Badge updated");
    assert!(!reply.ephemeral());
    assert_eq!(store.lookup(GUILD, 5).await.unwrap().as_deref(), Some("🦊"));
}

#[tokio::test]
async fn test_non_admin_cannot_set_badge() {
    let store = Arc::new(MemoryBadgeStore::new());
    let commands = commands_over(store.clone());

    let reply = commands
        .dispatch(
            &member(),
            Invocation::AddRoleBadge {
                role_id: 5,
                badge: "🦊".to_string(),
            },
        )
        .await;

    assert_eq!(text(&reply), "Missing Permission!");
    assert!(reply.ephemeral());
    assert_eq!(*reply.dismiss_after(), Some(Duration::from_secs(5)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_non_admin_cannot_remove_badge() {
    let store = Arc::new(MemoryBadgeStore::new());
    store.upsert(GUILD, 5, "🦊").await.unwrap();
    let commands = commands_over(store.clone());

    let reply = commands
        .dispatch(&member(), Invocation::RemoveRoleBadge { role_id: 5 })
        .await;

    assert_eq!(text(&reply), "Missing Permission!");
    assert_eq!(store.lookup(GUILD, 5).await.unwrap().as_deref(), Some("🦊"));
}

#[tokio::test]
async fn test_overlong_badge_is_rejected() {
    let store = Arc::new(MemoryBadgeStore::new());
    let commands = commands_over(store.clone());

    let reply = commands
        .dispatch(
            &admin(),
            Invocation::AddRoleBadge {
                role_id: 5,
                badge: "x".repeat(33),
            },
        )
        .await;

    assert!(text(&reply).starts_with("Invalid badge"));
    assert!(reply.ephemeral());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_commands_outside_a_guild_are_refused() {
    let commands = commands_over(Arc::new(MemoryBadgeStore::new()));
    let dm = Invoker::new(USER, None, true);

    let reply = commands.dispatch(&dm, Invocation::ListRoleBadges).await;

    assert_eq!(text(&reply), "This command only works in a server.");
}

#[tokio::test]
async fn test_any_member_can_list_badges() {
    let store = Arc::new(MemoryBadgeStore::new());
    store.upsert(GUILD, 7, "⭐").await.unwrap();
    store.upsert(GUILD, 3, "🦊").await.unwrap();
    store.upsert(GUILD + 1, 1, "🐸").await.unwrap();
    let commands = commands_over(store);

    let reply = commands.dispatch(&member(), Invocation::ListRoleBadges).await;
    let listing = listing(&reply);

    assert_eq!(listing.title(), "Roles and their Badges");
    assert_eq!(listing.roles(), "<@&3>\n<@&7>");
    assert_eq!(listing.badges(), "🦊\n⭐");
}

#[tokio::test]
async fn test_empty_listing_says_none() {
    let commands = commands_over(Arc::new(MemoryBadgeStore::new()));

    let reply = commands.dispatch(&member(), Invocation::ListRoleBadges).await;
    let listing = listing(&reply);

    assert_eq!(listing.roles(), "None");
    assert_eq!(listing.badges(), "None");
}

#[tokio::test]
async fn test_listing_is_rate_limited_per_user() {
    let commands = commands_over(Arc::new(MemoryBadgeStore::new()));

    let first = commands.dispatch(&member(), Invocation::ListRoleBadges).await;
    let second = commands.dispatch(&member(), Invocation::ListRoleBadges).await;
    let other = Invoker::new(USER + 1, Some(GUILD), false);
    let third = commands.dispatch(&other, Invocation::ListRoleBadges).await;

    assert!(matches!(first.body(), ReplyBody::Listing(_)));
    assert!(text(&second).starts_with("Slow down! Try again in"));
    assert!(second.ephemeral());
    assert!(matches!(third.body(), ReplyBody::Listing(_)));
}

#[tokio::test]
async fn test_cooldown_follows_settings() {
    let settings: CommandSettings =
        toml::from_str("list_cooldown_uses = 0").expect("valid settings");
    let commands = AdminCommands::new(Arc::new(MemoryBadgeStore::new()), settings);

    for _ in 0..5 {
        let reply = commands.dispatch(&member(), Invocation::ListRoleBadges).await;
        assert!(matches!(reply.body(), ReplyBody::Listing(_)));
    }
}

#[tokio::test]
async fn test_storage_failure_is_reported_generically() {
    let commands = commands_over(Arc::new(OfflineStore));

    let reply = commands
        .dispatch(
            &admin(),
            Invocation::AddRoleBadge {
                role_id: 5,
                badge: "🦊".to_string(),
            },
        )
        .await;

    assert_eq!(text(&reply), "An Unknown Error Occured!");
    assert!(reply.ephemeral());
    assert_eq!(*reply.dismiss_after(), Some(Duration::from_secs(7)));
}

#[tokio::test]
async fn test_remove_reports_whether_a_badge_existed() {
    let store = Arc::new(MemoryBadgeStore::new());
    store.upsert(GUILD, 5, "🦊").await.unwrap();
    let commands = commands_over(store.clone());

    let removed = commands
        .dispatch(&admin(), Invocation::RemoveRoleBadge { role_id: 5 })
        .await;
    let missing = commands
        .dispatch(&admin(), Invocation::RemoveRoleBadge { role_id: 5 })
        .await;

    assert_eq!(text(&removed), "Badge removed");
    assert_eq!(text(&missing), "No badge was configured for that role");
    assert_eq!(store.lookup(GUILD, 5).await.unwrap(), None);
}

#[test]
fn test_long_listing_is_truncated() {
    let mappings: Vec<_> = (1..=200)
        .map(|role| BadgeMapping::new(GUILD, 1_000_000_000_000_000 + role, Some("🦊".into())))
        .collect();

    let listing = BadgeListing::from_mappings(&mappings);

    assert!(listing.roles().chars().count() <= 1024);
    assert!(listing.badges().chars().count() <= 1024);
    assert!(listing.roles().ends_with("more"));
    assert_eq!(listing.roles().lines().count(), listing.badges().lines().count());
}

#[test]
fn test_empty_badge_is_shown_as_none() {
    let listing = BadgeListing::from_mappings(&[BadgeMapping::new(GUILD, 4, Some(String::new()))]);

    assert_eq!(listing.badges(), "(none)");
}
