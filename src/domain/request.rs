/// Decoded `tools/call` request body

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which tool to call and with what
///
/// `arguments` may be omitted by older clients; the invoker then passes an
/// empty object to the tool rather than nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Exact name of a registered tool
    pub name: String,
    /// Arguments keyed by parameter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Map<String, Value>>,
}

impl CallRequest {
    /// Request with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    /// Request with the given arguments
    pub fn with_arguments(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments: Some(arguments),
        }
    }
}
