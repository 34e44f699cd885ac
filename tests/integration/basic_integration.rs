/// Integration tests for tool invocation and request handling
use async_trait::async_trait;
use mcp_tool_server::*;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Tool that records every call it receives
struct Recorder {
    name: &'static str,
    calls: Arc<AtomicUsize>,
    last_arguments: Arc<Mutex<Option<Map<String, Value>>>>,
}

impl Recorder {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Arc::new(AtomicUsize::new(0)),
            last_arguments: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl Tool for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Records calls"
    }

    async fn execute(&self, arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        tokio::task::yield_now().await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_arguments.lock().unwrap() = Some(arguments);
        Ok(ToolExecuteResult::from("recorded"))
    }
}

/// Tool that hands its arguments back as data, yielding before it answers
#[derive(Default)]
struct Mirror {
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Map<String, Value>>>>,
}

#[async_trait]
impl Tool for Mirror {
    fn name(&self) -> &str {
        "mirror"
    }

    fn description(&self) -> &str {
        "Returns its arguments"
    }

    async fn execute(&self, arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.seen.lock().unwrap().push(arguments.clone());
        tokio::task::yield_now().await;
        Ok(ToolExecuteResult::from(arguments))
    }
}

/// Tool that always fails with a bare message
struct Failing;

#[async_trait]
impl Tool for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    async fn execute(&self, _arguments: Map<String, Value>) -> Result<ToolExecuteResult, ToolFailure> {
        Err(ToolFailure::from("boom"))
    }
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_tool_exactly_once_with_arguments() {
        let recorder = Recorder::new("record");
        let calls = recorder.calls.clone();
        let last = recorder.last_arguments.clone();
        let registry = ToolRegistry::new().with(recorder);

        let arguments = json!({"x": 1, "y": "two"}).as_object().cloned().unwrap();
        let request = CallRequest::with_arguments("record", arguments.clone());
        let envelope = handle_tool_call(request, &registry).await.unwrap();

        assert_eq!(envelope.first_text(), Some("recorded"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last.lock().unwrap().clone(), Some(arguments));
    }

    #[tokio::test]
    async fn test_omitted_arguments_become_empty_object() {
        let recorder = Recorder::new("record");
        let last = recorder.last_arguments.clone();
        let registry = ToolRegistry::new().with(recorder);

        handle_tool_call(CallRequest::new("record"), &registry).await.unwrap();

        assert_eq!(last.lock().unwrap().clone(), Some(Map::new()));
    }

    #[tokio::test]
    async fn test_unknown_tool_never_invokes_anything() {
        let recorder = Recorder::new("record");
        let calls = recorder.calls.clone();
        let registry = ToolRegistry::new().with(recorder);

        let result = handle_tool_call(CallRequest::new("nope"), &registry).await;

        assert!(matches!(result, Err(ToolCallError::MethodNotFound { ref name }) if name == "nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_duplicate_names_resolve_to_first() {
        let first = Recorder::new("dup");
        let second = Recorder::new("dup");
        let first_calls = first.calls.clone();
        let second_calls = second.calls.clone();
        let registry = ToolRegistry::new().with(first).with(second);

        handle_tool_call(CallRequest::new("dup"), &registry).await.unwrap();

        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_calls_keep_their_own_arguments() {
        let mirror = Mirror::default();
        let calls = mirror.calls.clone();
        let seen = mirror.seen.clone();
        let registry = ToolRegistry::new().with(mirror);

        let args = |n: i64| json!({"n": n}).as_object().cloned().unwrap();
        let (first, second, third) = tokio::join!(
            handle_tool_call(CallRequest::with_arguments("mirror", args(1)), &registry),
            handle_tool_call(CallRequest::with_arguments("mirror", args(2)), &registry),
            handle_tool_call(CallRequest::with_arguments("mirror", args(3)), &registry),
        );

        for (n, envelope) in [(1, first), (2, second), (3, third)] {
            let envelope = envelope.unwrap();
            assert!(!envelope.is_error());
            assert_eq!(envelope.structured_content, Some(args(n)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let mut seen: Vec<i64> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|a| a["n"].as_i64().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_tool_server_lends_its_registry() {
        let server = ToolServer::new(builtin_registry(), ServerConfig::default());
        let registry = server.registry();

        let args = json!({"message": "a"}).as_object().cloned().unwrap();
        let (echoed, missing) = tokio::join!(
            handle_tool_call(CallRequest::with_arguments("echo", args), registry),
            handle_tool_call(CallRequest::new("nope"), registry),
        );

        assert_eq!(echoed.unwrap().first_text(), Some("a"));
        assert!(missing.is_err());
        assert_eq!(registry.len(), 3);
    }

    #[tokio::test]
    async fn test_current_time_honors_documented_offset_argument() {
        let registry = builtin_registry();

        let args = json!({"timezone_offset_minutes": 330}).as_object().cloned().unwrap();
        let envelope = handle_tool_call(CallRequest::with_arguments("current_time", args), &registry)
            .await
            .unwrap();
        assert!(!envelope.is_error());
        let structured = envelope.structured_content.unwrap();
        assert!(structured["iso8601"].as_str().unwrap().ends_with("+05:30"));
        assert_eq!(structured["timezoneOffsetMinutes"], json!(330));

        let args = json!({"utc_offset_minutes": 330}).as_object().cloned().unwrap();
        let envelope = handle_tool_call(CallRequest::with_arguments("current_time", args), &registry)
            .await
            .unwrap();
        assert!(envelope.is_error());
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_error_envelope() {
        let registry = ToolRegistry::new().with(Failing);
        let envelope = handle_tool_call(CallRequest::new("failing"), &registry).await.unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"content": [{"type": "text", "text": "boom"}], "isError": true})
        );
    }

    #[tokio::test]
    async fn test_builtin_tools() {
        let registry = builtin_registry();

        let args = json!({"message": "hi"}).as_object().cloned().unwrap();
        let echoed = handle_tool_call(CallRequest::with_arguments("echo", args), &registry)
            .await
            .unwrap();
        assert_eq!(echoed.first_text(), Some("hi"));

        let args = json!({"a": 40, "b": 2}).as_object().cloned().unwrap();
        let sum = handle_tool_call(CallRequest::with_arguments("add", args), &registry)
            .await
            .unwrap();
        assert_eq!(sum.structured_content.unwrap()["sum"], json!(42.0));

        let missing = handle_tool_call(CallRequest::new("echo"), &registry).await.unwrap();
        assert!(missing.is_error());
    }

    fn server() -> McpServer {
        let registry = builtin_registry().with(Failing);
        McpServer::new(ToolServer::new(registry, ServerConfig::default()))
    }

    async fn call(server: &mut McpServer, request: Value) -> Value {
        let response = server
            .handle_line(&request.to_string())
            .await
            .expect("request gets a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_opens_session() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": MCP_VERSION,
                    "capabilities": {},
                    "clientInfo": {"name": "test-client", "version": "1.0"}
                }
            }),
        )
        .await;

        assert_eq!(response["result"]["protocolVersion"], json!(MCP_VERSION));
        assert_eq!(response["result"]["serverInfo"]["name"], json!("MCP Tool Server"));
        assert!(server.session_id().is_some());

        let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.handle_line(&notification.to_string()).await.is_none());
        assert!(server.is_initialized());
    }

    #[tokio::test]
    async fn test_notification_for_known_method_gets_no_response() {
        let mut server = server();
        let notification = json!({"jsonrpc": "2.0", "method": "tools/list"});
        assert!(server.handle_line(&notification.to_string()).await.is_none());
        assert!(!server.is_initialized());
    }

    #[tokio::test]
    async fn test_tools_list_includes_schemas() {
        let mut server = server();
        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

        let tools = response["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["echo", "add", "current_time", "failing"]);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["message"]));
        assert_eq!(tools[3]["inputSchema"], json!({"type": "object", "properties": {}}));
    }

    #[tokio::test]
    async fn test_tools_call_over_json_rpc() {
        let mut server = server();

        let response = call(
            &mut server,
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "add", "arguments": {"a": 1, "b": 2}}
            }),
        )
        .await;
        assert_eq!(response["result"]["structuredContent"]["sum"], json!(3.0));
        assert!(response["result"].get("isError").is_none());

        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "failing"}}),
        )
        .await;
        assert_eq!(response["result"]["isError"], json!(true));
        assert_eq!(response["result"]["content"][0]["text"], json!("boom"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let mut server = server();
        let response = call(
            &mut server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "missing"}}),
        )
        .await;
        assert!(response.get("result").is_none());
        assert_eq!(response["error"]["code"], json!(-32601));
        assert_eq!(response["error"]["message"], json!("Tool not found: missing"));
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let mut server = server();

        let response = serde_json::to_value(server.handle_line("{not json").await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], json!(-32700));
        assert_eq!(response["id"], Value::Null);

        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call"})).await;
        assert_eq!(response["error"]["code"], json!(-32602));

        let response = call(&mut server, json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"})).await;
        assert_eq!(response["error"]["code"], json!(-32601));

        assert!(server.handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_run_with_streams_responses() {
        let mut server = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"echo","arguments":{"message":"hey"}}}"#,
            "\n"
        );
        let mut output: Vec<u8> = Vec::new();

        server.run_with(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["result"], json!({}));
        assert_eq!(lines[1]["result"]["content"][0]["text"], json!("hey"));
    }
}
