/// What a tool may hand back from `execute`
///
/// Tools produce loosely shaped values; this enum pins down which shape a
/// value has so the normalizer can treat each one differently. Converting a
/// `serde_json::Value` classifies it in a fixed priority order:
/// string, null, envelope claim, plain object, anything else.

use serde_json::{Map, Value};

use crate::domain::validation::{claims_envelope, json_type_name};
use crate::domain::ResultEnvelope;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolExecuteResult {
    /// Plain text
    Text(String),
    /// Nothing was returned
    Absent,
    /// An object carrying a `content` field; must pass envelope validation
    Envelope(Map<String, Value>),
    /// A plain data object
    Data(Map<String, Value>),
    /// Arrays, numbers and booleans
    Unexpected(Value),
}

impl ToolExecuteResult {
    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ToolExecuteResult::Text(_) => "text",
            ToolExecuteResult::Absent => "absent",
            ToolExecuteResult::Envelope(_) => "envelope",
            ToolExecuteResult::Data(_) => "data",
            ToolExecuteResult::Unexpected(value) => json_type_name(value),
        }
    }
}

impl From<Value> for ToolExecuteResult {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => ToolExecuteResult::Text(text),
            Value::Null => ToolExecuteResult::Absent,
            Value::Object(map) => ToolExecuteResult::from(map),
            other => ToolExecuteResult::Unexpected(other),
        }
    }
}

impl From<Map<String, Value>> for ToolExecuteResult {
    fn from(map: Map<String, Value>) -> Self {
        if claims_envelope(&map) {
            ToolExecuteResult::Envelope(map)
        } else {
            ToolExecuteResult::Data(map)
        }
    }
}

impl From<String> for ToolExecuteResult {
    fn from(text: String) -> Self {
        ToolExecuteResult::Text(text)
    }
}

impl From<&str> for ToolExecuteResult {
    fn from(text: &str) -> Self {
        ToolExecuteResult::Text(text.to_string())
    }
}

impl From<ResultEnvelope> for ToolExecuteResult {
    fn from(envelope: ResultEnvelope) -> Self {
        match serde_json::to_value(envelope) {
            Ok(value) => ToolExecuteResult::from(value),
            Err(e) => ToolExecuteResult::Text(format!("Unserializable result envelope: {}", e)),
        }
    }
}

impl<T: Into<ToolExecuteResult>> From<Option<T>> for ToolExecuteResult {
    fn from(value: Option<T>) -> Self {
        value.map_or(ToolExecuteResult::Absent, Into::into)
    }
}
