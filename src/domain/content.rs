/// Content blocks carried inside a tool result envelope
///
/// Each block is tagged by its `type` field on the wire. Fields that the
/// protocol does not name (annotations, `_meta`, ...) are kept in `extra`
/// so a block survives a decode/encode cycle untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire tags accepted for a content block, in protocol order
pub const CONTENT_BLOCK_TYPES: [&str; 5] = ["text", "image", "audio", "resource_link", "resource"];

/// One typed unit of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Human-readable text
    Text {
        text: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Base64-encoded image
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Base64-encoded audio clip
    Audio {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Link to a resource the client can fetch itself
    ResourceLink {
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
    /// Embedded resource contents
    Resource {
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
}

impl ContentBlock {
    /// Create a plain text block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text {
            text: text.into(),
            extra: Map::new(),
        }
    }

    /// Create an image block from base64 data
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Image {
            data: data.into(),
            mime_type: mime_type.into(),
            extra: Map::new(),
        }
    }

    /// Create an audio block from base64 data
    pub fn audio(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Audio {
            data: data.into(),
            mime_type: mime_type.into(),
            extra: Map::new(),
        }
    }

    /// The wire tag for this block
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Image { .. } => "image",
            ContentBlock::Audio { .. } => "audio",
            ContentBlock::ResourceLink { .. } => "resource_link",
            ContentBlock::Resource { .. } => "resource",
        }
    }

    /// The text payload, if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
