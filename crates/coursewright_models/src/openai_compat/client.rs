//! Generic client for OpenAI-compatible APIs.

use crate::openai_compat::{ChatResponse, OpenAICompatError, conversions};
use async_trait::async_trait;
use coursewright_core::{GenerateRequest, GenerateResponse};
use coursewright_error::{CourseResult, HttpError};
use coursewright_interface::TextGenerationDriver;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Chat completions endpoint of the public OpenAI API.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Generic client for any OpenAI-compatible API.
///
/// This client speaks the chat completions format used by OpenAI and by
/// self-hosted gateways that mimic it.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication
    /// * `model` - Model used when a request does not name one
    /// * `base_url` - Full URL of the chat completions endpoint
    /// * `provider_name` - Name of the provider (for logging/tracing)
    #[instrument(skip(api_key), fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        provider_name: &'static str,
    ) -> Self {
        debug!(
            provider = provider_name,
            model = %model,
            url = %base_url,
            "Created OpenAI-compatible client"
        );

        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            provider_name,
        }
    }

    /// Replaces the HTTP client with one that gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> CourseResult<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Sends one chat completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, req), fields(provider = self.provider_name, model = %self.model))]
    pub async fn send_chat(
        &self,
        req: &GenerateRequest,
    ) -> Result<GenerateResponse, OpenAICompatError> {
        let chat_request = conversions::to_chat_request(req, &self.model)?;

        debug!(
            provider = self.provider_name,
            model = %chat_request.model(),
            message_count = chat_request.messages().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.provider_name, error = ?e, "HTTP request failed");
                OpenAICompatError::Http(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                error = %error_text,
                "API error"
            );

            return Err(OpenAICompatError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = ?e, "Failed to parse response");
            OpenAICompatError::ResponseParsing(format!("Failed to parse JSON: {}", e))
        })?;

        debug!(
            provider = self.provider_name,
            choices = chat_response.choices.len(),
            "Received response"
        );

        conversions::from_chat_response(&chat_response)
    }
}

#[async_trait]
impl TextGenerationDriver for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> CourseResult<GenerateResponse> {
        Ok(self.send_chat(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
