//! Upstream lookup error types (video search, transcripts, images).

/// Kinds of upstream lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LookupErrorKind {
    /// Video search returned no results for the query
    #[display("No video found for query: {}", _0)]
    NoVideoResults(String),
    /// Transcript could not be retrieved for the video
    #[display("Transcript unavailable for video {}: {}", video_id, reason)]
    TranscriptUnavailable {
        /// Video identifier
        video_id: String,
        /// Why the transcript could not be fetched
        reason: String,
    },
    /// Image search returned no results for the term
    #[display("No image found for term: {}", _0)]
    NoImageResults(String),
}

/// Upstream lookup error with location tracking.
///
/// Lookup failures are fatal to the enrichment workflow and never retried.
///
/// # Examples
///
/// ```
/// use coursewright_error::{LookupError, LookupErrorKind};
///
/// let err = LookupError::new(LookupErrorKind::NoVideoResults("rust ownership".to_string()));
/// assert!(format!("{}", err).contains("rust ownership"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Lookup Error: {} at line {} in {}", kind, line, file)]
pub struct LookupError {
    /// The kind of error that occurred
    pub kind: LookupErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LookupError {
    /// Create a new lookup error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LookupErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
