//! Provider clients for Coursewright.
//!
//! - [`OpenAICompatibleClient`] implements `TextGenerationDriver` for any
//!   chat completions endpoint.
//! - [`YouTubeClient`] implements `VideoSearch` and `TranscriptFetch`.
//! - [`UnsplashClient`] implements `ImageSearch`.

mod openai_compat;
mod unsplash;
mod youtube;

pub use openai_compat::{
    ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage, OPENAI_CHAT_URL,
    OpenAICompatError, OpenAICompatibleClient,
};
pub use unsplash::{UNSPLASH_API_BASE, UnsplashClient};
pub use youtube::{
    CaptionTrack, SearchItem, SearchItemId, SearchResponse, YOUTUBE_API_BASE, YOUTUBE_WATCH_BASE,
    YouTubeClient, caption_tracks, preferred_track, transcript_text,
};
