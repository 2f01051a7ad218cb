//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Record not found where one was required
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Attempted mutation violates a record's lifecycle rules
    #[display("Invalid state transition: {}", _0)]
    InvalidTransition(String),
    /// Failed to write a record
    #[display("Failed to write record: {}", _0)]
    WriteFailed(String),
    /// Failed to read a record
    #[display("Failed to read record: {}", _0)]
    ReadFailed(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// Fatal to the operation that encountered it; callers propagate it rather
/// than swallowing it.
///
/// # Examples
///
/// ```
/// use squadboard_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("post 42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
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
}
