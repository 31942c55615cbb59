//! Upstream lookup traits: video search, transcripts and images.

use async_trait::async_trait;
use coursewright_error::CourseResult;

/// Finds an educational video for a search query.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns the identifier of the best matching video.
    ///
    /// Fails with a lookup error when the search has no results.
    async fn search(&self, query: &str) -> CourseResult<String>;
}

/// Retrieves the spoken transcript of a video.
#[async_trait]
pub trait TranscriptFetch: Send + Sync {
    /// Returns the transcript as plain text.
    ///
    /// Fails with a lookup error when no transcript is available.
    async fn fetch(&self, video_id: &str) -> CourseResult<String>;
}

/// Finds a cover image for a search term.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Returns the URL of the best matching image.
    async fn search(&self, term: &str) -> CourseResult<String>;
}
