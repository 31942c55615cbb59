//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Record not found
    #[display("{} not found: {}", entity, id)]
    NotFound {
        /// Record type (course, unit, chapter, user)
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },
    /// Snapshot could not be read or written
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Snapshot contents could not be (de)serialized
    #[display("Snapshot format error: {}", _0)]
    Snapshot(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use coursewright_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound {
///     entity: "chapter",
///     id: "42".to_string(),
/// });
/// assert!(format!("{}", err).contains("chapter not found"));
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

    /// Shorthand for a missing record.
    #[track_caller]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorKind::NotFound {
            entity,
            id: id.to_string(),
        })
    }
}
