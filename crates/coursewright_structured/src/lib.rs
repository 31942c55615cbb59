//! Schema-conformant JSON extraction from text-generation models.
//!
//! [`StructuredGenerator`] wraps any [`TextGenerationDriver`] and turns its
//! free-form completions into JSON matching an [`OutputShape`]. Responses are
//! repaired, parsed and validated; failures are described back to the model
//! in the next attempt until the request's retry limit is reached.
//!
//! [`TextGenerationDriver`]: coursewright_interface::TextGenerationDriver

mod generator;
mod output;
mod prompt;
mod questions;
mod repair;
mod request;
mod shape;
mod validate;

pub use generator::{GenerationAttempt, GenerationTrace, StructuredGenerator};
pub use output::GenerationOutput;
pub use prompt::{PromptMode, append_error_context, compose_system_prompt};
pub use questions::{QUESTIONS_PER_SET, QuestionSetGenerator, question_shape};
pub use repair::repair_quotes;
pub use request::{
    DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GenerationRequest,
    GenerationRequestBuilder, GenerationSettings, UserPrompt,
};
pub use shape::{OutputShape, ShapeField, is_placeholder};
pub use validate::{conform, conform_object, values_only};
