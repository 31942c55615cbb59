//! The self-correcting structured generator.

use crate::{
    GenerationOutput, GenerationRequest, PromptMode, append_error_context, compose_system_prompt,
    conform, repair_quotes,
};
use coursewright_core::{GenerateRequest, Message};
use coursewright_error::{BackendError, CourseResult, GenerationError, GenerationErrorKind};
use coursewright_interface::TextGenerationDriver;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Record of one round trip to the backend.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct GenerationAttempt {
    /// Attempt number, starting at 1
    number: usize,
    /// System message sent on this attempt
    system_prompt: String,
    /// Text of the first completion choice
    raw: String,
    /// Text after quote repair
    repaired: String,
    /// Why the attempt was rejected, if it was
    error: Option<GenerationErrorKind>,
    /// Error context carried into the next attempt
    error_context: String,
}

/// Every attempt made for a request, and how the request ended.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct GenerationTrace {
    /// Attempts in order
    attempts: Vec<GenerationAttempt>,
    /// Conformant output, or exhaustion
    outcome: Result<GenerationOutput, GenerationErrorKind>,
}

impl GenerationTrace {
    /// Consumes the trace, returning the outcome.
    pub fn into_outcome(self) -> Result<GenerationOutput, GenerationErrorKind> {
        self.outcome
    }
}

/// Turns free-form model completions into shape-conformant JSON.
///
/// Each attempt sends the caller's instruction plus shape and formatting
/// rules to the driver. Responses that do not parse or do not match the shape
/// are fed back into the next attempt's system message. Driver errors end the
/// call immediately.
#[derive(Debug, Clone)]
pub struct StructuredGenerator<D> {
    driver: D,
}

impl<D: TextGenerationDriver> StructuredGenerator<D> {
    /// Creates a generator over the given backend.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The backend this generator calls.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Generates conformant output, retrying up to the request's limit.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.driver.provider_name(),
            model = %request.model(),
            prompts = request.user_prompt().len(),
        )
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> CourseResult<GenerationOutput> {
        let trace = self.generate_traced(request).await?;
        match trace.into_outcome() {
            Ok(output) => Ok(output),
            Err(kind) => Err(GenerationError::new(kind).into()),
        }
    }

    /// Generates output and deserializes it into `T`.
    ///
    /// Batched requests deserialize from the JSON array of elements, so `T`
    /// is usually a `Vec`. Output that conforms to the shape but not to `T`
    /// is rejected like any other attempt and fed back to the model.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.driver.provider_name(),
            model = %request.model(),
            target = std::any::type_name::<T>(),
        )
    )]
    pub async fn generate_as<T: DeserializeOwned>(
        &self,
        request: &GenerationRequest,
    ) -> CourseResult<T> {
        let (_, outcome) = self.attempt_loop(request, deserialize_output::<T>).await?;
        outcome.map_err(|kind| GenerationError::new(kind).into())
    }

    /// Runs the attempt loop and returns every attempt alongside the outcome.
    ///
    /// Exhaustion is reported in the trace's outcome. Driver errors are
    /// returned as `Err`.
    pub async fn generate_traced(&self, request: &GenerationRequest) -> CourseResult<GenerationTrace> {
        let (attempts, outcome) = self.attempt_loop(request, Ok).await?;
        Ok(GenerationTrace { attempts, outcome })
    }

    async fn attempt_loop<T, F>(
        &self,
        request: &GenerationRequest,
        accept: F,
    ) -> CourseResult<(Vec<GenerationAttempt>, Result<T, GenerationErrorKind>)>
    where
        F: Fn(GenerationOutput) -> Result<T, GenerationErrorKind>,
    {
        let mode = PromptMode::detect(request);
        let max_retries = *request.max_retries();
        let verbose = *request.verbose();
        let user_message = request.user_prompt().render();

        debug!(
            batched = mode.batched,
            dynamic_fields = mode.dynamic_fields,
            list_output = mode.list_output,
            max_retries,
            "Starting structured generation"
        );

        let mut error_context = String::new();
        let mut attempts: Vec<GenerationAttempt> = Vec::with_capacity(max_retries);

        for number in 1..=max_retries {
            let system_prompt = compose_system_prompt(request, &mode, &error_context);
            if verbose {
                info!(attempt = number, system = %system_prompt, user = %user_message, "Sending prompt");
            } else {
                debug!(attempt = number, system_len = system_prompt.len(), "Sending prompt");
            }

            let backend_request = GenerateRequest::builder()
                .messages(vec![
                    Message::system(system_prompt.clone()),
                    Message::user(user_message.clone()),
                ])
                .model(request.model().clone())
                .temperature(*request.temperature())
                .build()
                .map_err(|e| BackendError::new(format!("Failed to build backend request: {}", e)))?;

            let response = self.driver.generate(&backend_request).await?;
            if response.outputs().len() > 1 {
                debug!(attempt = number, choices = response.outputs().len(), "Using first choice");
            }
            let raw = response.first_text().to_string();
            let repaired = repair_quotes(&raw);

            if verbose {
                info!(attempt = number, response = %raw, "Received response");
            } else {
                debug!(attempt = number, response_len = raw.len(), "Received response");
            }

            match conform(&repaired, request, &mode).and_then(|output| accept(output)) {
                Ok(accepted) => {
                    debug!(attempt = number, "Output accepted");
                    attempts.push(GenerationAttempt {
                        number,
                        system_prompt,
                        raw,
                        repaired,
                        error: None,
                        error_context: error_context.clone(),
                    });
                    return Ok((attempts, Ok(accepted)));
                }
                Err(kind) => {
                    warn!(attempt = number, max_retries, error = %kind, "Output rejected");
                    append_error_context(&mut error_context, &raw, &kind.to_string());
                    attempts.push(GenerationAttempt {
                        number,
                        system_prompt,
                        raw,
                        repaired,
                        error: Some(kind),
                        error_context: error_context.clone(),
                    });
                }
            }
        }

        let last_error = attempts
            .last()
            .and_then(|attempt| attempt.error.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| "no attempts were allowed".to_string());
        warn!(attempts = attempts.len(), "Giving up on structured generation");

        let outcome = Err(GenerationErrorKind::ExhaustedRetries {
            attempts: attempts.len(),
            last_error,
        });
        Ok((attempts, outcome))
    }
}

fn deserialize_output<T: DeserializeOwned>(output: GenerationOutput) -> Result<T, GenerationErrorKind> {
    serde_json::from_value(output.into_value()).map_err(|e| GenerationErrorKind::TypeMismatch {
        target: std::any::type_name::<T>().to_string(),
        message: e.to_string(),
    })
}
