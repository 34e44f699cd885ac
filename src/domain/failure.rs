/// Failures raised by a tool's own logic
///
/// A tool can fail with a typed error, a bare message, or an arbitrary JSON
/// value. None of these abort the caller; they are rendered into an
/// `isError` envelope by the normalizer.

use serde_json::Value;
use std::any::Any;
use std::fmt;

#[derive(Debug)]
pub enum ToolFailure {
    /// A typed error; its `Display` output is the message
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// A bare message
    Message(String),
    /// Any other failure value
    Value(Value),
}

impl ToolFailure {
    pub fn error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ToolFailure::Error(Box::new(error))
    }

    pub fn message(message: impl Into<String>) -> Self {
        ToolFailure::Message(message.into())
    }

    pub fn value(value: Value) -> Self {
        ToolFailure::Value(value)
    }

    /// Build a failure from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        ToolFailure::Message(format!("Tool panicked: {}", detail))
    }

    /// Best-effort human-readable message
    ///
    /// Strings are used verbatim. Objects with a string `message` field
    /// yield that field; other objects and arrays are pretty-printed; any
    /// remaining value is rendered as JSON text.
    pub fn describe(&self) -> String {
        match self {
            ToolFailure::Error(error) => error.to_string(),
            ToolFailure::Message(message) => message.clone(),
            ToolFailure::Value(value) => describe_value(value),
        }
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => pretty(value),
        },
        Value::Array(_) => pretty(value),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<String> for ToolFailure {
    fn from(message: String) -> Self {
        ToolFailure::Message(message)
    }
}

impl From<&str> for ToolFailure {
    fn from(message: &str) -> Self {
        ToolFailure::Message(message.to_string())
    }
}

impl From<Value> for ToolFailure {
    fn from(value: Value) -> Self {
        ToolFailure::Value(value)
    }
}

impl From<serde_json::Error> for ToolFailure {
    fn from(error: serde_json::Error) -> Self {
        ToolFailure::error(error)
    }
}
