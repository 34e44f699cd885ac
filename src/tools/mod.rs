/// Callable tools and their invocation
///
/// This module defines the `Tool` trait every callable operation
/// implements, the registry that holds them, the invoker that runs one per
/// call, and the built-in tools shipped with the server.

pub mod add;
pub mod echo;
pub mod invoke;
pub mod registry;
pub mod time;

pub use add::AddTool;
pub use echo::EchoTool;
pub use invoke::handle_tool_call;
pub use registry::ToolRegistry;
pub use time::CurrentTimeTool;

use async_trait::async_trait;
use jsonrpc_core::ErrorCode;
use schemars::JsonSchema;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{ToolExecuteResult, ToolFailure};

/// A named operation a client can call
///
/// `execute` may complete immediately or await other work; the invoker waits
/// for it either way. Returning `Err` never aborts the caller, it produces
/// an `isError` result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name clients use to call this tool
    fn name(&self) -> &str;

    /// Human-readable description shown in `tools/list`
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments, if the tool declares one
    fn parameter_schema(&self) -> Option<Value> {
        None
    }

    /// Run the tool
    async fn execute(&self, arguments: Map<String, Value>)
        -> Result<ToolExecuteResult, ToolFailure>;
}

/// Errors that escape a tool call as protocol-level failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("Tool not found: {name}")]
    MethodNotFound { name: String },
}

impl ToolCallError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            ToolCallError::MethodNotFound { .. } => ErrorCode::MethodNotFound,
        }
    }
}

/// Registry holding every built-in tool
pub fn builtin_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(EchoTool)
        .with(AddTool)
        .with(CurrentTimeTool)
}

/// Input schema derived from a parameter struct
pub(crate) fn schema_of<T: JsonSchema>() -> Option<Value> {
    serde_json::to_value(schemars::schema_for!(T)).ok()
}

/// Decode tool arguments into a typed parameter struct
pub(crate) fn parse_arguments<T>(arguments: Map<String, Value>) -> Result<T, ToolFailure>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolFailure::message(format!("Invalid arguments: {}", e)))
}
