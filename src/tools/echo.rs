/// Tool that repeats its input back as plain text

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{ToolExecuteResult, ToolFailure};
use crate::tools::{parse_arguments, schema_of, Tool};

/// Parameters for echoing a message
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EchoParams {
    /// Text to send back
    pub message: String,
}

pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo a message back to the caller"
    }

    fn parameter_schema(&self) -> Option<Value> {
        schema_of::<EchoParams>()
    }

    async fn execute(&self, arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        let params: EchoParams = parse_arguments(arguments)?;
        Ok(params.message.into())
    }
}
