//! Request and response types for text generation.

use crate::{Message, TokenUsageData};
use serde::{Deserialize, Serialize};

/// Generic chat generation request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Conversation messages, usually one system and one user message
    messages: Vec<Message>,
    /// Maximum tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier; the driver default is used when absent
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// `outputs` holds one text entry per returned choice.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateResponse {
    /// Text content of each completion choice
    outputs: Vec<String>,
    /// Token usage reported by the provider
    #[builder(default)]
    usage: Option<TokenUsageData>,
}

impl GenerateResponse {
    /// Returns a builder for constructing a GenerateResponse.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Creates a response holding a single text completion.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            outputs: vec![content.into()],
            usage: None,
        }
    }

    /// Returns the first completion, or an empty string when there is none.
    pub fn first_text(&self) -> &str {
        self.outputs.first().map(String::as_str).unwrap_or_default()
    }
}
