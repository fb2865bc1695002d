//! Admin command error types.

use crate::StorageError;
use std::time::Duration;

/// Admin command failure conditions.
#[derive(Debug, Clone, derive_more::Display)]
pub enum CommandErrorKind {
    /// Invoker lacks the administrator permission
    #[display("Missing administrator permission")]
    MissingPermission,
    /// Invoker is still on cooldown for this command
    #[display("Command on cooldown, retry after {}s", retry_after.as_secs())]
    Cooldown {
        /// Time until the invoker may run the command again
        retry_after: Duration,
    },
    /// Command was invoked outside of a guild
    #[display("Command used outside of a guild")]
    NotInGuild,
    /// An argument failed validation
    #[display("Invalid argument '{}': {}", name, reason)]
    InvalidArgument {
        /// Option name
        name: String,
        /// Why it was rejected
        reason: String,
    },
    /// Badge store failed
    #[display("{}", _0)]
    Storage(StorageError),
}

/// Admin command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    /// The kind of error that occurred
    pub kind: CommandErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CommandError {
    /// Create a new command error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CommandErrorKind {
        &self.kind
    }
}

impl From<StorageError> for CommandError {
    #[track_caller]
    fn from(err: StorageError) -> Self {
        CommandError::new(CommandErrorKind::Storage(err))
    }
}

/// Result type for admin commands.
pub type CommandResult<T> = Result<T, CommandError>;
