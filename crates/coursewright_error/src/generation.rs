//! Structured generation error types.

/// Ways a parsed response can fail to match the requested output shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ShapeMismatch {
    /// A required (non-placeholder) key is absent from an output object
    #[display("{} not in json output", _0)]
    MissingKey(String),
    /// Batched mode expected a JSON array
    #[display("output not in an array")]
    NotAnArray,
    /// Batched mode received an array of the wrong length
    #[display("expected {} json objects in the output array, got {}", expected, actual)]
    BatchLength {
        /// Number of prompts in the batch
        expected: usize,
        /// Number of elements returned
        actual: usize,
    },
    /// An output element (or nested field) is not a JSON object
    #[display("{} is not a json object", _0)]
    NotAnObject(String),
    /// A classification field did not resolve to a string
    #[display("{} must be one of the listed string values", _0)]
    NonStringCategory(String),
}

/// Specific error conditions for structured generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// The repaired response text is not valid JSON
    ParseFailure(String),
    /// The response is valid JSON but does not match the requested shape
    ShapeMismatch(ShapeMismatch),
    /// Conformant output that does not deserialize into the caller's type
    TypeMismatch {
        /// Name of the target type
        target: String,
        /// Deserializer message
        message: String,
    },
    /// Every attempt failed
    ExhaustedRetries {
        /// Number of attempts made
        attempts: usize,
        /// Message of the last attempt's failure
        last_error: String,
    },
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::ParseFailure(msg) => {
                write!(f, "Failed to parse model output as JSON: {}", msg)
            }
            GenerationErrorKind::ShapeMismatch(mismatch) => {
                write!(f, "Output shape mismatch: {}", mismatch)
            }
            GenerationErrorKind::TypeMismatch { target, message } => {
                write!(f, "Output does not deserialize into {}: {}", target, message)
            }
            GenerationErrorKind::ExhaustedRetries {
                attempts,
                last_error,
            } => write!(
                f,
                "No conformant output after {} attempt(s); last error: {}",
                attempts, last_error
            ),
        }
    }
}

impl From<ShapeMismatch> for GenerationErrorKind {
    fn from(mismatch: ShapeMismatch) -> Self {
        GenerationErrorKind::ShapeMismatch(mismatch)
    }
}

/// Structured generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use coursewright_error::{GenerationError, GenerationErrorKind, ShapeMismatch};
///
/// let err = GenerationError::new(ShapeMismatch::MissingKey("summary".to_string()).into());
/// assert!(format!("{}", err).contains("summary not in json output"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}
