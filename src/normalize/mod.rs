/// Result normalizer
///
/// Turns whatever a tool produced into the canonical result envelope.
/// Text and absent values are wrapped, envelope claims are validated and
/// passed through, plain objects are summarized as text with the object
/// attached as structured content.

mod render;

pub use render::{
    render_object, MAX_FALLBACK_CHARS, MAX_RENDERED_CHARS, TRUNCATION_MARKER,
    UNRENDERABLE_PLACEHOLDER,
};

use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::validation::{json_type_name, validate_envelope};
use crate::domain::{
    NormalizeError, ResultEnvelope, ToolExecuteResult, ToolFailure, ValidationIssue,
};

/// Normalize a tool result, rejecting malformed envelopes
///
/// This is the only fallible path: a value that claims to be an envelope
/// but fails validation is returned as `NormalizeError::InvalidEnvelope`.
pub fn normalize(result: ToolExecuteResult) -> Result<ResultEnvelope, NormalizeError> {
    match result {
        ToolExecuteResult::Text(text) => Ok(ResultEnvelope::text(text)),
        ToolExecuteResult::Absent => Ok(ResultEnvelope::empty()),
        ToolExecuteResult::Envelope(map) => accept_envelope(map),
        ToolExecuteResult::Data(map) => Ok(summarize_object(map)),
        ToolExecuteResult::Unexpected(value) => Ok(ResultEnvelope::text(format!(
            "Unexpected tool result type: {}",
            json_type_name(&value)
        ))),
    }
}

/// Normalize a tool result without ever failing
///
/// A rejected envelope becomes an `isError` envelope carrying the
/// rejection message.
pub fn normalize_safe(result: ToolExecuteResult) -> ResultEnvelope {
    match normalize(result) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(issues = e.issues().len(), "Tool returned an invalid result envelope: {}", e);
            normalize_error(&ToolFailure::error(e))
        }
    }
}

/// Render a tool failure as an `isError` envelope
pub fn normalize_error(failure: &ToolFailure) -> ResultEnvelope {
    ResultEnvelope::error(failure.describe())
}

fn accept_envelope(map: Map<String, Value>) -> Result<ResultEnvelope, NormalizeError> {
    let validation = validate_envelope(&map);
    if !validation.valid {
        return Err(NormalizeError::InvalidEnvelope {
            issues: validation.errors,
        });
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| NormalizeError::InvalidEnvelope {
        issues: vec![ValidationIssue::new("envelope", e.to_string())],
    })
}

fn summarize_object(map: Map<String, Value>) -> ResultEnvelope {
    ResultEnvelope::text(render_object(&map)).with_structured_content(map)
}
