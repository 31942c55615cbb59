//! Parsing and shape validation of repaired model output.

use crate::{GenerationOutput, GenerationRequest, OutputShape, PromptMode, ShapeField};
use coursewright_error::{GenerationErrorKind, ShapeMismatch};
use serde_json::Value;

/// Parses repaired response text and checks it against the request's shape.
///
/// Classification fields are normalized in place. With `values_only` set,
/// every object is reduced to its values.
pub fn conform(
    text: &str,
    request: &GenerationRequest,
    mode: &PromptMode,
) -> Result<GenerationOutput, GenerationErrorKind> {
    let parsed: Value = serde_json::from_str(text)
        .map_err(|e| GenerationErrorKind::ParseFailure(e.to_string()))?;

    let shape = request.shape();
    let default = request.default_category();
    let finish = |value: Value| {
        if *request.values_only() {
            values_only(value, shape)
        } else {
            value
        }
    };

    if mode.batched {
        let Value::Array(mut items) = parsed else {
            return Err(ShapeMismatch::NotAnArray.into());
        };
        let expected = request.user_prompt().len();
        if items.len() != expected {
            return Err(ShapeMismatch::BatchLength {
                expected,
                actual: items.len(),
            }
            .into());
        }
        for item in &mut items {
            conform_object(item, shape, default, "")?;
        }
        Ok(GenerationOutput::Batch(items.into_iter().map(finish).collect()))
    } else {
        let mut value = parsed;
        conform_object(&mut value, shape, default, "")?;
        Ok(GenerationOutput::Single(finish(value)))
    }
}

/// Checks one object against a shape, recursing into nested fields.
///
/// `path` is the dotted key path of the object, empty at the top level.
pub fn conform_object(
    value: &mut Value,
    shape: &OutputShape,
    default_category: &str,
    path: &str,
) -> Result<(), ShapeMismatch> {
    let Value::Object(map) = value else {
        let label = if path.is_empty() { "output" } else { path };
        return Err(ShapeMismatch::NotAnObject(label.to_string()));
    };

    for (key, field) in shape.fields() {
        if crate::is_placeholder(key) {
            continue;
        }
        let full_key = if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        };
        let Some(slot) = map.get_mut(key) else {
            return Err(ShapeMismatch::MissingKey(full_key));
        };

        match field {
            ShapeField::Text(_) => {}
            ShapeField::OneOf(allowed) => conform_category(slot, allowed, default_category, &full_key)?,
            ShapeField::Nested(inner) => conform_object(slot, inner, default_category, &full_key)?,
        }
    }
    Ok(())
}

fn conform_category(
    slot: &mut Value,
    allowed: &[String],
    default_category: &str,
    key: &str,
) -> Result<(), ShapeMismatch> {
    if let Value::Array(items) = slot {
        *slot = items.first().cloned().unwrap_or(Value::Null);
    }

    let is_allowed = matches!(slot, Value::String(s) if allowed.contains(s));
    if !is_allowed && !default_category.is_empty() {
        *slot = Value::String(default_category.to_string());
    }

    match slot {
        Value::String(s) => {
            if let Some(colon) = s.find(':') {
                s.truncate(colon);
            }
            Ok(())
        }
        _ => Err(ShapeMismatch::NonStringCategory(key.to_string())),
    }
}

/// Reduces an object to its values.
///
/// Values of the shape's fixed keys come first in declaration order, followed
/// by any generated keys in response order. A single value is unwrapped.
pub fn values_only(value: Value, shape: &OutputShape) -> Value {
    let Value::Object(map) = value else {
        return value;
    };

    let fixed: Vec<&str> = shape.required_keys().collect();
    let mut values: Vec<Value> = fixed
        .iter()
        .filter_map(|key| map.get(*key).cloned())
        .collect();
    values.extend(
        map.iter()
            .filter(|(key, _)| !fixed.contains(&key.as_str()))
            .map(|(_, v)| v.clone()),
    );

    if values.len() == 1 {
        values.pop().unwrap_or(Value::Null)
    } else {
        Value::Array(values)
    }
}
