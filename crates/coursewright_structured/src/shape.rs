//! Declarative output shape descriptors.
//!
//! An [`OutputShape`] lists the fields a model must return, in order. Each
//! field is free text, a classification into a fixed set of values, or a
//! nested shape. Keys (and text values) may contain `<placeholder>` markers
//! telling the model to invent the key or value itself.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("PLACEHOLDER regex should compile"));

/// Whether the text contains a `<...>` placeholder marker.
///
/// # Examples
///
/// ```
/// use coursewright_structured::is_placeholder;
///
/// assert!(is_placeholder("<location>"));
/// assert!(is_placeholder("Go to <place> now"));
/// assert!(!is_placeholder("location"));
/// ```
pub fn is_placeholder(text: &str) -> bool {
    PLACEHOLDER.is_match(text)
}

/// Constraint on a single output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeField {
    /// Prose generated according to the instruction.
    Text(String),
    /// Exactly one of the allowed values.
    OneOf(Vec<String>),
    /// An object conforming to the nested shape.
    Nested(OutputShape),
}

impl ShapeField {
    fn to_json(&self) -> Value {
        match self {
            ShapeField::Text(instruction) => Value::String(instruction.clone()),
            ShapeField::OneOf(allowed) => {
                Value::Array(allowed.iter().cloned().map(Value::String).collect())
            }
            ShapeField::Nested(shape) => shape.to_json(),
        }
    }
}

/// Ordered mapping from field name to field constraint.
///
/// # Examples
///
/// ```
/// use coursewright_structured::OutputShape;
///
/// let shape = OutputShape::new()
///     .text("summary", "summary of the text")
///     .one_of("sentiment", ["positive", "negative", "neutral"]);
///
/// assert_eq!(
///     shape.to_json_string(),
///     r#"{"summary":"summary of the text","sentiment":["positive","negative","neutral"]}"#
/// );
/// assert!(shape.has_list_fields());
/// assert!(!shape.has_dynamic_fields());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputShape {
    fields: Vec<(String, ShapeField)>,
}

impl OutputShape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, keeping the position of an existing key.
    pub fn field(mut self, key: impl Into<String>, field: ShapeField) -> Self {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key, field)),
        }
        self
    }

    /// Adds a free-text field.
    pub fn text(self, key: impl Into<String>, instruction: impl Into<String>) -> Self {
        self.field(key, ShapeField::Text(instruction.into()))
    }

    /// Adds a classification field.
    pub fn one_of<I, S>(self, key: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(
            key,
            ShapeField::OneOf(allowed.into_iter().map(Into::into).collect()),
        )
    }

    /// Adds a nested object field.
    pub fn nested(self, key: impl Into<String>, shape: OutputShape) -> Self {
        self.field(key, ShapeField::Nested(shape))
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ShapeField)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    /// Keys the model must return verbatim (placeholder keys excluded).
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| !is_placeholder(key))
    }

    /// Looks up a field by key.
    pub fn get(&self, key: &str) -> Option<&ShapeField> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, field)| field)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The shape as a JSON object, in declaration order.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(key, field)| (key.clone(), field.to_json()))
            .collect();
        Value::Object(map)
    }

    /// The shape serialized as compact JSON, as shown to the model.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Whether any key or value (at any depth) carries a placeholder marker.
    pub fn has_dynamic_fields(&self) -> bool {
        is_placeholder(&self.to_json_string())
    }

    /// Whether any field (at any depth) is a classification.
    pub fn has_list_fields(&self) -> bool {
        self.fields.iter().any(|(_, field)| match field {
            ShapeField::OneOf(_) => true,
            ShapeField::Nested(shape) => shape.has_list_fields(),
            ShapeField::Text(_) => false,
        })
    }
}

impl TryFrom<Value> for OutputShape {
    type Error = String;

    /// Reads a shape from its JSON form: strings are text fields, arrays of
    /// strings are classifications and objects are nested shapes.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(map) = value else {
            return Err("output shape must be a JSON object".to_string());
        };

        let mut shape = OutputShape::new();
        for (key, value) in map {
            let field = match value {
                Value::String(instruction) => ShapeField::Text(instruction),
                Value::Array(items) => {
                    let allowed = items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => Ok(s),
                            other => Err(format!(
                                "allowed values of '{}' must be strings, got {}",
                                key, other
                            )),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    ShapeField::OneOf(allowed)
                }
                nested @ Value::Object(_) => ShapeField::Nested(OutputShape::try_from(nested)?),
                other => {
                    return Err(format!(
                        "field '{}' must be a string, array or object, got {}",
                        key, other
                    ));
                }
            };
            shape = shape.field(key, field);
        }
        Ok(shape)
    }
}

impl Serialize for OutputShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OutputShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        OutputShape::try_from(value).map_err(serde::de::Error::custom)
    }
}
