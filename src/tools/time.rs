/// Tool that reports the current time as a complete result envelope

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{ResultEnvelope, ToolExecuteResult, ToolFailure};
use crate::tools::{parse_arguments, schema_of, Tool};

/// Parameters for reading the clock
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CurrentTimeParams {
    /// Offset from UTC in minutes (defaults to 0)
    #[serde(default)]
    pub timezone_offset_minutes: Option<i32>,
}

pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time, optionally at a fixed UTC offset"
    }

    fn parameter_schema(&self) -> Option<Value> {
        schema_of::<CurrentTimeParams>()
    }

    async fn execute(&self, arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        let params: CurrentTimeParams = parse_arguments(arguments)?;
        let minutes = params.timezone_offset_minutes.unwrap_or(0);
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ToolFailure::message(format!("Invalid UTC offset: {} minutes", minutes)))?;

        let now = Utc::now().with_timezone(&offset);
        let iso8601 = now.to_rfc3339();

        let mut structured = Map::new();
        structured.insert("iso8601".to_string(), Value::String(iso8601.clone()));
        structured.insert("unix".to_string(), Value::from(now.timestamp()));
        structured.insert("timezoneOffsetMinutes".to_string(), Value::from(minutes));

        let envelope = ResultEnvelope::text(format!("Current time: {}", iso8601))
            .with_structured_content(structured);
        Ok(envelope.into())
    }
}
