//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Could not open or reach the backing store
    #[display("Storage connection error: {}", _0)]
    Connection(String),
    /// Connection pool exhausted or misconfigured
    #[display("Connection pool error: {}", _0)]
    Pool(String),
    /// Statement failed to execute
    #[display("Storage query error: {}", _0)]
    Query(String),
    /// Schema migration failed
    #[display("Migration error: {}", _0)]
    Migration(String),
    /// Blocking storage task panicked or was cancelled
    #[display("Storage task failed: {}", _0)]
    Join(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use rolebadge_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Query("disk I/O error".to_string()));
/// assert!(format!("{}", err).contains("disk I/O error"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        StorageError::new(StorageErrorKind::Query(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        StorageError::new(StorageErrorKind::Connection(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<diesel::r2d2::PoolError> for StorageError {
    #[track_caller]
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StorageError::new(StorageErrorKind::Pool(err.to_string()))
    }
}
