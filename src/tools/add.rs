/// Tool that adds two numbers and returns a bare data object

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::domain::{ToolExecuteResult, ToolFailure};
use crate::tools::{parse_arguments, schema_of, Tool};

/// Parameters for adding two numbers
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddParams {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

pub struct AddTool;

#[async_trait]
impl Tool for AddTool {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers"
    }

    fn parameter_schema(&self) -> Option<Value> {
        schema_of::<AddParams>()
    }

    async fn execute(&self, arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        let AddParams { a, b } = parse_arguments(arguments)?;
        let sum = a + b;
        if !sum.is_finite() {
            return Err(ToolFailure::message(format!("Sum of {} and {} is not finite", a, b)));
        }

        // Returned as plain data; the normalizer renders it and attaches it
        // as structured content
        Ok(json!({ "a": a, "b": b, "sum": sum }).into())
    }
}
