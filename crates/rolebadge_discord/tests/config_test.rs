//! Tests for bot configuration loading.

use rolebadge_discord::BotConfig;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_defaults_apply_to_missing_sections() {
    let config: BotConfig = toml::from_str("").expect("empty config parses");

    assert_eq!(config.database().url(), "rolebadge.db");
    assert_eq!(*config.commands().list_cooldown_uses(), 1);
    assert_eq!(config.commands().list_cooldown(), Duration::from_secs(5));
    assert_eq!(config.commands().error_dismiss(), Duration::from_secs(7));
    assert_eq!(config.commands().notice_dismiss(), Duration::from_secs(5));
    assert_eq!(*config.commands().max_badge_len(), 32);
    assert_eq!(config.logging().level(), "info");
    assert!(!*config.logging().json());
}

#[test]
fn test_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[database]
url = "/var/lib/rolebadge/badges.db"
max_connections = 4

[commands]
list_cooldown_uses = 3
list_cooldown_secs = 60

[logging]
level = "rolebadge_core=debug"
json = true
"#
    )
    .unwrap();

    let config = BotConfig::from_file(file.path()).expect("config loads");

    assert_eq!(config.database().url(), "/var/lib/rolebadge/badges.db");
    assert_eq!(*config.database().max_connections(), 4);
    assert_eq!(*config.database().busy_timeout_ms(), 5000);
    assert_eq!(*config.commands().list_cooldown_uses(), 3);
    assert_eq!(config.commands().list_cooldown(), Duration::from_secs(60));
    assert_eq!(*config.commands().max_badge_len(), 32);
    assert_eq!(config.logging().level(), "rolebadge_core=debug");
    assert!(*config.logging().json());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let (config, found) = BotConfig::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert!(!found);
    assert_eq!(config, BotConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[commands]\nlist_cooldown_uses = \"many\"").unwrap();

    let err = BotConfig::from_file(file.path()).unwrap_err();

    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_database_url_can_be_overridden() {
    let config = BotConfig::default().with_database_url(":memory:");

    assert!(config.database().is_in_memory());
}
