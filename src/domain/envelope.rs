/// The canonical tool result envelope
///
/// This is the `result` payload of a `tools/call` response. Every tool
/// outcome, successful or not, ends up in this shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ContentBlock;

/// Result of one tool call as it goes over the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// Ordered output blocks; empty only when the tool returned nothing
    pub content: Vec<ContentBlock>,
    /// Set when the tool call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    /// Machine-readable payload alongside the content blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Map<String, Value>>,
    /// Any other top-level fields a tool supplied (e.g. `_meta`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultEnvelope {
    /// Envelope holding a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            ..Self::default()
        }
    }

    /// Envelope with no content at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Failed-call envelope carrying a single text block
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(message)],
            is_error: Some(true),
            ..Self::default()
        }
    }

    /// Attach a structured payload
    pub fn with_structured_content(mut self, structured: Map<String, Value>) -> Self {
        self.structured_content = Some(structured);
        self
    }

    /// Whether this envelope reports a failed call
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first block, if it is a text block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ContentBlock::as_text)
    }
}
