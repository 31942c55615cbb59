//! YouTube video search and transcript client.

use crate::youtube::{SearchResponse, caption_tracks, preferred_track, transcript_text};
use async_trait::async_trait;
use coursewright_error::{CourseResult, HttpError, LookupError, LookupErrorKind};
use coursewright_interface::{TranscriptFetch, VideoSearch};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Base URL of the YouTube Data API v3.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
/// Base URL of the public watch pages.
pub const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com";

const TRANSCRIPT_LANGUAGE: &str = "en";

/// Finds videos through the Data API and scrapes their captions.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    api_base: String,
    watch_base: String,
}

impl YouTubeClient {
    /// Creates a client for the public endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: YOUTUBE_API_BASE.to_string(),
            watch_base: YOUTUBE_WATCH_BASE.to_string(),
        }
    }

    /// Points the Data API calls at another base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Points watch page requests at another base URL.
    pub fn with_watch_base(mut self, watch_base: impl Into<String>) -> Self {
        self.watch_base = watch_base.into();
        self
    }

    /// Replaces the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> CourseResult<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Returns the id of the first medium-length embeddable video matching `query`.
    #[instrument(skip(self))]
    pub async fn search_video(&self, query: &str) -> CourseResult<String> {
        let url = format!("{}/search", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("videoDuration", "medium"),
                ("videoEmbeddable", "true"),
                ("type", "video"),
                ("maxResults", "5"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "YouTube search request failed");
                HttpError::new(format!("YouTube search failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %body, "YouTube search API error");
            return Err(HttpError::with_status(status.as_u16(), body).into());
        }

        let results: SearchResponse = response
            .json()
            .await
            .map_err(|e| HttpError::new(format!("Invalid YouTube search response: {}", e)))?;

        let video_id = results
            .items
            .into_iter()
            .find_map(|item| item.id.video_id)
            .ok_or_else(|| LookupError::new(LookupErrorKind::NoVideoResults(query.to_string())))?;

        debug!(video_id = %video_id, "Found video");
        Ok(video_id)
    }

    /// Returns the English (or first available) caption track as plain text.
    #[instrument(skip(self))]
    pub async fn transcript(&self, video_id: &str) -> CourseResult<String> {
        match self.try_transcript(video_id).await {
            Ok(text) => {
                debug!(words = text.split_whitespace().count(), "Fetched transcript");
                Ok(text)
            }
            Err(reason) => {
                error!(reason = %reason, "Transcript unavailable");
                Err(LookupError::new(LookupErrorKind::TranscriptUnavailable {
                    video_id: video_id.to_string(),
                    reason,
                })
                .into())
            }
        }
    }

    async fn try_transcript(&self, video_id: &str) -> Result<String, String> {
        let page = self
            .fetch_text(&format!("{}/watch", self.watch_base), &[("v", video_id)])
            .await?;
        let tracks = caption_tracks(&page)?;
        let track = preferred_track(&tracks, TRANSCRIPT_LANGUAGE)
            .ok_or_else(|| "no caption track".to_string())?;

        let xml = self.fetch_text(&track.base_url, &[]).await?;
        let text = transcript_text(&xml);
        if text.trim().is_empty() {
            return Err("transcript is empty".to_string());
        }
        Ok(text)
    }

    async fn fetch_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("{} returned {}", url, status));
        }
        response
            .text()
            .await
            .map_err(|e| format!("unreadable body from {}: {}", url, e))
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str) -> CourseResult<String> {
        self.search_video(query).await
    }
}

#[async_trait]
impl TranscriptFetch for YouTubeClient {
    async fn fetch(&self, video_id: &str) -> CourseResult<String> {
        self.transcript(video_id).await
    }
}
