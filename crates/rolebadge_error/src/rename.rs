//! Errors raised when renaming a guild member.

/// Why a rename request failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenameErrorKind {
    /// The bot may not change this member's nickname (e.g. the member outranks the bot)
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),
    /// Network, rate limit or any other HTTP failure
    #[display("Transport error: {}", _0)]
    Transport(String),
}

/// Rename error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rename Error: {} at line {} in {}", kind, line, file)]
pub struct RenameError {
    /// The kind of error that occurred
    pub kind: RenameErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenameError {
    /// Create a new rename error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenameErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RenameErrorKind {
        &self.kind
    }
}

/// Result type for rename requests.
pub type RenameResult<T> = Result<T, RenameError>;
