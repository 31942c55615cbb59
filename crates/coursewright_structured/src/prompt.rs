//! System prompt composition.

use crate::GenerationRequest;

/// Output modes detected once per request, before the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptMode {
    /// The user prompt is a batch
    pub batched: bool,
    /// The shape asks the model to invent keys or values
    pub dynamic_fields: bool,
    /// The shape has classification fields
    pub list_output: bool,
}

impl PromptMode {
    /// Inspects the request.
    pub fn detect(request: &GenerationRequest) -> Self {
        Self {
            batched: request.user_prompt().is_batch(),
            dynamic_fields: request.shape().has_dynamic_fields(),
            list_output: request.shape().has_list_fields(),
        }
    }
}

const CLASSIFY_INSTRUCTION: &str =
    "\nIf an output field is a list, classify the output into the best matching element of that list.";

const PLACEHOLDER_INSTRUCTION: &str = "\nAny text enclosed by < and > indicates you must generate content to replace it. \
Example input: Go to <location>, Example output: Go to the garden\
\nAny output key containing < and > indicates you must generate the key name to replace it. \
Example input: {\"<location>\": \"description of location\"}, \
Example output: {\"school\": \"a place for education\"}";

const BATCH_INSTRUCTION: &str =
    "\nGenerate an array of json, one json object for each input element, in the same order.";

/// Builds the system message for one attempt.
///
/// The caller's instruction comes first, then the shape and formatting rules,
/// then the error context accumulated from earlier attempts.
pub fn compose_system_prompt(
    request: &GenerationRequest,
    mode: &PromptMode,
    error_context: &str,
) -> String {
    let mut prompt = String::with_capacity(request.system_prompt().len() + error_context.len() + 512);
    prompt.push_str(request.system_prompt());
    prompt.push_str(&format!(
        "\nYou are to output the following in json format: {}. \
         \nDo not put quotation marks or escape characters \\ in the output fields.",
        request.shape().to_json_string()
    ));

    if mode.list_output {
        prompt.push_str(CLASSIFY_INSTRUCTION);
    }
    if mode.dynamic_fields {
        prompt.push_str(PLACEHOLDER_INSTRUCTION);
    }
    if mode.batched {
        prompt.push_str(BATCH_INSTRUCTION);
    }

    prompt.push_str(error_context);
    prompt
}

/// Appends a failed attempt to the error context fed into the next attempt.
pub fn append_error_context(error_context: &mut String, response: &str, error: &str) {
    error_context.push_str("\n\nResult: ");
    error_context.push_str(response);
    error_context.push_str("\n\nError message: ");
    error_context.push_str(error);
}
