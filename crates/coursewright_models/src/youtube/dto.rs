//! YouTube Data API and caption track payloads.

use serde::Deserialize;

/// Response of the `search` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching resources, best first
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// Resource identifier
    pub id: SearchItemId,
}

/// Identifier of a search hit. Only video hits carry `videoId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    /// Video identifier
    #[serde(default)]
    pub video_id: Option<String>,
}

/// A caption track advertised by the watch page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// URL of the timed-text XML
    pub base_url: String,
    /// BCP-47 language code
    #[serde(default)]
    pub language_code: String,
}
