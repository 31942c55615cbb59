//! Text-generation driver trait.

use async_trait::async_trait;
use coursewright_core::{GenerateRequest, GenerateResponse};
use coursewright_error::CourseResult;
use std::sync::Arc;

/// A single-turn chat completion backend.
///
/// Implementations send the request's messages to a model and return the
/// completion text. Transport failures and malformed bodies are returned as
/// errors; callers decide whether to retry.
#[async_trait]
pub trait TextGenerationDriver: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, req: &GenerateRequest) -> CourseResult<GenerateResponse>;

    /// Provider name used in logs (e.g. "openai").
    fn provider_name(&self) -> &'static str;

    /// Default model used when the request does not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D> TextGenerationDriver for Arc<D>
where
    D: TextGenerationDriver + ?Sized,
{
    async fn generate(&self, req: &GenerateRequest) -> CourseResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
