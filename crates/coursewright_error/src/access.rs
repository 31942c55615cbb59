//! Access gate error types.

/// Reasons a workflow was refused before any generation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessErrorKind {
    /// No authenticated user
    Unauthorized,
    /// User has no credits left and no subscription
    NoCredits,
}

impl std::fmt::Display for AccessErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessErrorKind::Unauthorized => write!(f, "unauthorized"),
            AccessErrorKind::NoCredits => write!(f, "no credits"),
        }
    }
}

/// Access error with source location tracking.
#[derive(Debug, Clone)]
pub struct AccessError {
    /// The specific refusal
    pub kind: AccessErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AccessError {
    /// Create a new AccessError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AccessErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Access Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for AccessError {}
