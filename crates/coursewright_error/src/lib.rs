//! Error types for the Coursewright library.
//!
//! Every error records the file and line where it was created. Crate-specific
//! errors are collected into [`CourseErrorKind`] and carried by the boxed
//! [`CourseError`], so `?` works across the whole workspace.

mod access;
mod generation;
mod http;
mod lookup;
mod message;
mod storage;

pub use access::{AccessError, AccessErrorKind};
pub use generation::{GenerationError, GenerationErrorKind, ShapeMismatch};
pub use http::HttpError;
pub use lookup::{LookupError, LookupErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use message::{BackendError, ConfigError, ValidationError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum CourseErrorKind {
    /// HTTP error
    Http(HttpError),
    /// Text-generation backend error
    Backend(BackendError),
    /// Configuration error
    Config(ConfigError),
    /// Structured generation error
    Generation(GenerationError),
    /// Video, transcript or image lookup error
    Lookup(LookupError),
    /// Course store error
    Storage(StorageError),
    /// Session or credit gate refusal
    Access(AccessError),
    /// Invalid workflow input
    Validation(ValidationError),
}

impl std::fmt::Display for CourseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseErrorKind::Http(e) => write!(f, "{}", e),
            CourseErrorKind::Backend(e) => write!(f, "{}", e),
            CourseErrorKind::Config(e) => write!(f, "{}", e),
            CourseErrorKind::Generation(e) => write!(f, "{}", e),
            CourseErrorKind::Lookup(e) => write!(f, "{}", e),
            CourseErrorKind::Storage(e) => write!(f, "{}", e),
            CourseErrorKind::Access(e) => write!(f, "{}", e),
            CourseErrorKind::Validation(e) => write!(f, "{}", e),
        }
    }
}

/// Coursewright error with kind discrimination.
///
/// # Examples
///
/// ```
/// use coursewright_error::{CourseError, CourseErrorKind, ConfigError};
///
/// let err: CourseError = ConfigError::new("bad model").into();
/// assert!(matches!(err.kind(), CourseErrorKind::Config(_)));
/// ```
#[derive(Debug)]
pub struct CourseError(Box<CourseErrorKind>);

impl CourseError {
    /// Create a new error from a kind.
    pub fn new(kind: CourseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CourseErrorKind {
        &self.0
    }

    /// Returns the generation error kind, if this is a generation error.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            CourseErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for CourseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coursewright Error: {}", self.0)
    }
}

impl std::error::Error for CourseError {}

// Generic From implementation for any type that converts to CourseErrorKind
impl<T> From<T> for CourseError
where
    T: Into<CourseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Coursewright operations.
pub type CourseResult<T> = std::result::Result<T, CourseError>;
