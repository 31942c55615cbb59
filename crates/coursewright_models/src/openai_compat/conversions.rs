//! Type conversions between Coursewright and OpenAI formats.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse, OpenAICompatError};
use coursewright_core::{GenerateRequest, GenerateResponse, TokenUsageData};

/// Converts a GenerateRequest to OpenAI chat format.
///
/// The request's model wins over `default_model`.
pub fn to_chat_request(
    req: &GenerateRequest,
    default_model: &str,
) -> Result<ChatRequest, OpenAICompatError> {
    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role().as_ref().to_string(),
            content: msg.content().clone(),
        })
        .collect();

    let model = req.model().as_deref().unwrap_or(default_model);

    let mut builder = ChatRequest::builder();
    builder.model(model).messages(messages);

    if let Some(max_tokens) = req.max_tokens() {
        builder.max_tokens(*max_tokens);
    }

    if let Some(temp) = req.temperature() {
        builder.temperature(*temp);
    }

    builder
        .build()
        .map_err(|e| OpenAICompatError::Builder(format!("Failed to build request: {}", e)))
}

/// Converts an OpenAI chat response to a GenerateResponse.
pub fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, OpenAICompatError> {
    if response.choices.is_empty() {
        return Err(OpenAICompatError::ResponseParsing(
            "No choices in response".to_string(),
        ));
    }

    let outputs: Vec<String> = response
        .choices
        .iter()
        .map(|choice| choice.message.content.clone())
        .collect();

    let usage = response.usage.as_ref().and_then(|u| {
        match (u.prompt_tokens, u.completion_tokens, u.total_tokens) {
            (Some(input), Some(output), Some(total)) => Some(TokenUsageData::new(
                input as u64,
                output as u64,
                total as u64,
            )),
            _ => None,
        }
    });

    GenerateResponse::builder()
        .outputs(outputs)
        .usage(usage)
        .build()
        .map_err(|e| OpenAICompatError::Builder(format!("Failed to build response: {}", e)))
}
