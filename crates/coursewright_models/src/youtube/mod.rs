//! YouTube video search and caption transcripts.

mod client;
mod dto;
mod transcript;

pub use client::{YOUTUBE_API_BASE, YOUTUBE_WATCH_BASE, YouTubeClient};
pub use dto::{CaptionTrack, SearchItem, SearchItemId, SearchResponse};
pub use transcript::{caption_tracks, preferred_track, transcript_text};
