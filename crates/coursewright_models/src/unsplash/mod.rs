//! Unsplash photo search.

use async_trait::async_trait;
use coursewright_error::{CourseResult, HttpError, LookupError, LookupErrorKind};
use coursewright_interface::ImageSearch;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Base URL of the Unsplash API.
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
}

/// Looks up course cover images on Unsplash.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: Client,
    access_key: String,
    api_base: String,
}

impl UnsplashClient {
    /// Creates a client for the public API.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_key: access_key.into(),
            api_base: UNSPLASH_API_BASE.to_string(),
        }
    }

    /// Points requests at another base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
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

    /// Returns the small-size URL of the top photo for `term`.
    #[instrument(skip(self))]
    pub async fn search_photo(&self, term: &str) -> CourseResult<String> {
        let url = format!("{}/search/photos", self.api_base);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[("per_page", "1"), ("query", term)])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Unsplash request failed");
                HttpError::new(format!("Unsplash search failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %body, "Unsplash API error");
            return Err(HttpError::with_status(status.as_u16(), body).into());
        }

        let results: PhotoSearchResponse = response
            .json()
            .await
            .map_err(|e| HttpError::new(format!("Invalid Unsplash response: {}", e)))?;

        let image = results
            .results
            .into_iter()
            .next()
            .map(|photo| photo.urls.small)
            .ok_or_else(|| LookupError::new(LookupErrorKind::NoImageResults(term.to_string())))?;

        debug!(image = %image, "Found image");
        Ok(image)
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn search(&self, term: &str) -> CourseResult<String> {
        self.search_photo(term).await
    }
}
