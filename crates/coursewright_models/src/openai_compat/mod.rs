//! Generic OpenAI-compatible API client.
//!
//! This module provides a reusable client for any API that follows the OpenAI
//! chat completions format.

mod client;
mod conversions;
mod dto;

pub use client::{OPENAI_CHAT_URL, OpenAICompatibleClient};
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage, OpenAICompatError};
