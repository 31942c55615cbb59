//! Conformant generation results.

use serde::Serialize;
use serde_json::Value;

/// A validated result, index-aligned with the input batch when batched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    /// One object (or values) for a single prompt.
    Single(Value),
    /// One object (or values) per batch element, in input order.
    Batch(Vec<Value>),
}

impl GenerationOutput {
    /// Whether this output answers a batch.
    pub fn is_batch(&self) -> bool {
        matches!(self, GenerationOutput::Batch(_))
    }

    /// Number of answered prompts.
    pub fn len(&self) -> usize {
        match self {
            GenerationOutput::Single(_) => 1,
            GenerationOutput::Batch(items) => items.len(),
        }
    }

    /// Whether there are no answers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single value. A batch is returned as a JSON array.
    pub fn into_single(self) -> Value {
        self.into_value()
    }

    /// The batch elements. A single value becomes a one-element batch.
    pub fn into_batch(self) -> Vec<Value> {
        match self {
            GenerationOutput::Single(value) => vec![value],
            GenerationOutput::Batch(items) => items,
        }
    }

    /// The output as one JSON value, for typed deserialization.
    pub fn into_value(self) -> Value {
        match self {
            GenerationOutput::Single(value) => value,
            GenerationOutput::Batch(items) => Value::Array(items),
        }
    }
}
