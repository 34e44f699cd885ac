/// Tool resolution and invocation
///
/// Looks a tool up by name, runs it once, and hands the outcome to the
/// normalizer. Only an unknown tool name escapes as an error; every failure
/// inside the tool, including a panic, comes back as an `isError` envelope.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::domain::{CallRequest, ResultEnvelope, ToolFailure};
use crate::normalize::{normalize_error, normalize_safe};
use crate::tools::{ToolCallError, ToolRegistry};

/// Resolve `request.name` in `registry`, invoke it, and normalize the outcome
pub async fn handle_tool_call(
    request: CallRequest,
    registry: &ToolRegistry,
) -> Result<ResultEnvelope, ToolCallError> {
    let CallRequest { name, arguments } = request;

    let tool = registry
        .find(&name)
        .ok_or_else(|| ToolCallError::MethodNotFound { name: name.clone() })?;

    // Tools written before arguments became optional expect an object
    let arguments = arguments.unwrap_or_default();
    debug!(tool = %name, arguments = arguments.len(), "Invoking tool");

    let outcome = AssertUnwindSafe(tool.execute(arguments))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(ToolFailure::from_panic(panic)));

    let envelope = match outcome {
        Ok(result) => {
            debug!(tool = %name, kind = result.kind(), "Tool completed");
            normalize_safe(result)
        }
        Err(failure) => {
            warn!(tool = %name, "Tool execution failed: {}", failure);
            normalize_error(&failure)
        }
    };

    Ok(envelope)
}
