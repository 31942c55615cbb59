//! Generation request types.

use crate::OutputShape;
use coursewright_error::ValidationError;
use serde::{Deserialize, Serialize};

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Sampling temperature used when a request does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
/// Attempts made before giving up.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// The user side of a generation: one prompt, or a batch answered in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserPrompt {
    /// A single prompt producing a single object.
    Single(String),
    /// Several prompts producing one object each, in order.
    Batch(Vec<String>),
}

impl UserPrompt {
    /// Whether this prompt is a batch.
    pub fn is_batch(&self) -> bool {
        matches!(self, UserPrompt::Batch(_))
    }

    /// Number of objects expected back.
    pub fn len(&self) -> usize {
        match self {
            UserPrompt::Single(_) => 1,
            UserPrompt::Batch(prompts) => prompts.len(),
        }
    }

    /// Whether there is nothing to ask.
    pub fn is_empty(&self) -> bool {
        match self {
            UserPrompt::Single(prompt) => prompt.is_empty(),
            UserPrompt::Batch(prompts) => prompts.is_empty(),
        }
    }

    /// The text sent as the user message.
    ///
    /// A batch is sent as one JSON array of prompt strings so the model can
    /// answer every element in a single completion.
    pub fn render(&self) -> String {
        match self {
            UserPrompt::Single(prompt) => prompt.clone(),
            UserPrompt::Batch(prompts) => serde_json::Value::from(prompts.clone()).to_string(),
        }
    }
}

impl From<&str> for UserPrompt {
    fn from(prompt: &str) -> Self {
        UserPrompt::Single(prompt.to_string())
    }
}

impl From<String> for UserPrompt {
    fn from(prompt: String) -> Self {
        UserPrompt::Single(prompt)
    }
}

impl From<Vec<String>> for UserPrompt {
    fn from(prompts: Vec<String>) -> Self {
        UserPrompt::Batch(prompts)
    }
}

impl From<Vec<&str>> for UserPrompt {
    fn from(prompts: Vec<&str>) -> Self {
        UserPrompt::Batch(prompts.into_iter().map(str::to_string).collect())
    }
}

/// Model settings shared by every request a workflow issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct GenerationSettings {
    /// Model identifier
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum number of attempts per request
    max_retries: usize,
    /// Log composed prompts and raw responses at info level
    verbose: bool,
}

impl GenerationSettings {
    /// Creates settings from explicit values.
    pub fn new(model: impl Into<String>, temperature: f32, max_retries: usize, verbose: bool) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_retries,
            verbose,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_MAX_RETRIES, false)
    }
}

/// One structured generation call.
///
/// # Examples
///
/// ```
/// use coursewright_structured::{GenerationRequest, OutputShape};
///
/// let request = GenerationRequest::builder()
///     .system_prompt("You summarise transcripts")
///     .user_prompt("summarise this")
///     .shape(OutputShape::new().text("summary", "summary text"))
///     .build()
///     .expect("valid request");
///
/// assert_eq!(*request.max_retries(), 3);
/// assert_eq!(request.default_category(), "");
/// assert!(!request.user_prompt().is_batch());
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// Caller's system instruction
    system_prompt: String,
    /// Single prompt or batch
    user_prompt: UserPrompt,
    /// Required output shape
    shape: OutputShape,
    /// Replacement for classification values outside the allowed set (empty: none)
    #[builder(default)]
    default_category: String,
    /// Return each object's values instead of the object
    #[builder(default)]
    values_only: bool,
    /// Model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Sampling temperature
    #[builder(default = "DEFAULT_TEMPERATURE")]
    temperature: f32,
    /// Maximum number of attempts
    #[builder(default = "DEFAULT_MAX_RETRIES")]
    max_retries: usize,
    /// Log composed prompts and raw responses at info level
    #[builder(default)]
    verbose: bool,
}

impl GenerationRequest {
    /// Returns a builder for constructing a GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}

impl GenerationRequestBuilder {
    /// Applies model, temperature, retry and verbosity settings.
    pub fn settings(&mut self, settings: &GenerationSettings) -> &mut Self {
        self.model(settings.model().clone())
            .temperature(*settings.temperature())
            .max_retries(*settings.max_retries())
            .verbose(*settings.verbose())
    }

    /// Builds the request, reporting missing fields as a validation error.
    pub fn finish(&self) -> Result<GenerationRequest, ValidationError> {
        self.build()
            .map_err(|e| ValidationError::new(format!("Invalid generation request: {}", e)))
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(shape) = &self.shape
            && shape.is_empty()
        {
            return Err("output shape has no fields".to_string());
        }
        if let Some(prompt) = &self.user_prompt
            && prompt.is_batch()
            && prompt.is_empty()
        {
            return Err("batched user prompt is empty".to_string());
        }
        Ok(())
    }
}
