/// Structural validation and type guards for tool results
///
/// These checks decide whether a raw JSON value that looks like a result
/// envelope really is one. Problems are collected in encounter order rather
/// than stopping at the first one, so a rejection can name everything wrong.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::CONTENT_BLOCK_TYPES;

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path of the offending field (e.g. `content[0].text`)
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Name of a JSON value's runtime type
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True for a non-null, non-array object
pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// True when an object carries a `content` field and therefore asks to be
/// treated as a result envelope
pub fn claims_envelope(map: &Map<String, Value>) -> bool {
    map.contains_key("content")
}

/// Validate a raw object against the result envelope shape
pub fn validate_envelope(map: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();

    match map.get("content") {
        Some(Value::Array(blocks)) => {
            for (index, block) in blocks.iter().enumerate() {
                validate_content_block(block, &format!("content[{}]", index), &mut errors);
            }
        }
        Some(other) => errors.push(ValidationIssue::new(
            "content",
            format!("Expected array, received {}", json_type_name(other)),
        )),
        None => errors.push(ValidationIssue::new("content", "Required")),
    }

    if let Some(flag) = map.get("isError") {
        if !flag.is_boolean() {
            errors.push(ValidationIssue::new(
                "isError",
                format!("Expected boolean, received {}", json_type_name(flag)),
            ));
        }
    }

    if let Some(structured) = map.get("structuredContent") {
        if !is_plain_object(structured) {
            errors.push(ValidationIssue::new(
                "structuredContent",
                format!("Expected object, received {}", json_type_name(structured)),
            ));
        }
    }

    ValidationResult::from_issues(errors)
}

/// Validate one content block, appending problems under `path`
///
/// `resource_link` and `resource` blocks are only checked for their tag.
pub fn validate_content_block(block: &Value, path: &str, errors: &mut Vec<ValidationIssue>) {
    let Some(fields) = block.as_object() else {
        errors.push(ValidationIssue::new(
            path,
            format!("Expected object, received {}", json_type_name(block)),
        ));
        return;
    };

    let tag = fields.get("type").and_then(Value::as_str);
    match tag {
        Some("text") => require_string(fields, path, "text", errors),
        Some("image") | Some("audio") => {
            require_string(fields, path, "data", errors);
            require_string(fields, path, "mimeType", errors);
        }
        Some("resource_link") | Some("resource") => {}
        Some(unknown) => errors.push(ValidationIssue::new(
            format!("{}.type", path),
            format!(
                "Invalid discriminator value '{}'. Expected one of: {}",
                unknown,
                CONTENT_BLOCK_TYPES.join(", ")
            ),
        )),
        None => errors.push(ValidationIssue::new(
            format!("{}.type", path),
            format!(
                "Missing discriminator. Expected one of: {}",
                CONTENT_BLOCK_TYPES.join(", ")
            ),
        )),
    }
}

fn require_string(
    fields: &Map<String, Value>,
    path: &str,
    name: &str,
    errors: &mut Vec<ValidationIssue>,
) {
    let message = match fields.get(name) {
        Some(Value::String(_)) => return,
        Some(other) => format!("Expected string, received {}", json_type_name(other)),
        None => "Required".to_string(),
    };
    errors.push(ValidationIssue::new(format!("{}.{}", path, name), message));
}
