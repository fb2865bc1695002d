//! Discord-specific error types.

use std::fmt;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscordErrorKind {
    /// Serenity API error (e.g., HTTP error, gateway error, rate limit).
    SerenityError(String),

    /// Bot token is missing.
    MissingToken,

    /// Badge store could not be opened.
    StorageUnavailable(String),
}

impl fmt::Display for DiscordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerenityError(msg) => write!(f, "Serenity API error: {msg}"),
            Self::MissingToken => write!(f, "Discord bot token not provided"),
            Self::StorageUnavailable(msg) => write!(f, "Badge store unavailable: {msg}"),
        }
    }
}

/// Discord error with source location tracking.
#[derive(Debug, Clone)]
pub struct DiscordError {
    /// The kind of error that occurred
    pub kind: DiscordErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use rolebadge_discord::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::MissingToken);
    /// assert!(err.to_string().contains("token"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl fmt::Display for DiscordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discord Error: {} at line {} in {}", self.kind, self.line, self.file)
    }
}

impl std::error::Error for DiscordError {}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}

impl From<rolebadge_error::StorageError> for DiscordError {
    #[track_caller]
    fn from(err: rolebadge_error::StorageError) -> Self {
        DiscordError::new(DiscordErrorKind::StorageUnavailable(err.to_string()))
    }
}
