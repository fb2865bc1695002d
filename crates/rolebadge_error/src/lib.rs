//! Error types for the rolebadge bot.
//!
//! Every concern gets a location-tracked error struct wrapping a `…Kind` enum.
//! [`RolebadgeError`] aggregates them for setup paths and the binary.

#![warn(missing_docs)]

mod command;
mod config;
mod rename;
mod storage;

pub use command::{CommandError, CommandErrorKind, CommandResult};
pub use config::ConfigError;
pub use rename::{RenameError, RenameErrorKind, RenameResult};
pub use storage::{StorageError, StorageErrorKind, StorageResult};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum RolebadgeErrorKind {
    /// Badge store error
    #[display("{}", _0)]
    Storage(StorageError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
}

/// Rolebadge error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Rolebadge Error: {}", _0)]
pub struct RolebadgeError(Box<RolebadgeErrorKind>);

impl RolebadgeError {
    /// Create a new error from a kind.
    pub fn new(kind: RolebadgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RolebadgeErrorKind {
        &self.0
    }
}

impl std::error::Error for RolebadgeError {}

// Generic From implementation for any type that converts to RolebadgeErrorKind
impl<T> From<T> for RolebadgeError
where
    T: Into<RolebadgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rolebadge operations.
pub type RolebadgeResult<T> = std::result::Result<T, RolebadgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_converts_into_crate_error() {
        let err: RolebadgeError =
            StorageError::new(StorageErrorKind::Migration("bad sql".to_string())).into();
        assert!(matches!(err.kind(), RolebadgeErrorKind::Storage(_)));
        assert!(err.to_string().contains("bad sql"));
    }

    #[test]
    fn test_command_error_wraps_storage_error() {
        let err: CommandError =
            StorageError::new(StorageErrorKind::Query("locked".to_string())).into();
        assert!(matches!(err.kind(), CommandErrorKind::Storage(_)));
    }

    #[test]
    fn test_cooldown_display_reports_seconds() {
        let err = CommandError::new(CommandErrorKind::Cooldown {
            retry_after: std::time::Duration::from_secs(4),
        });
        assert!(err.to_string().contains("retry after 4s"));
    }
}
