/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads newline-delimited JSON-RPC requests
/// 2. Routes `tools/call` through the invoker and normalizer
/// 3. Writes one JSON-RPC response per request

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::domain::CallRequest;
use crate::mcp::protocol::*;
use crate::session::SessionId;
use crate::tools::handle_tool_call;
use crate::{ServerError, ToolServer};

/// MCP server for one connected client
pub struct McpServer {
    /// Registry, sessions and configuration
    tool_server: ToolServer,
    /// Whether the client has confirmed initialization
    initialized: bool,
    /// Session opened by `initialize`
    session: Option<SessionId>,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tool_server: ToolServer) -> Self {
        Self {
            tool_server,
            initialized: false,
            session: None,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_with(stdin, stdout).await
    }

    /// Serve requests from `reader` until it is exhausted, writing responses
    /// to `writer`
    pub async fn run_with<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        self.close_session();
        Ok(())
    }

    /// Process a single line of JSON-RPC input
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error_with(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Session opened by the last `initialize`, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Whether the client sent its `initialized` notification
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        self.record_activity();

        if request.is_notification() {
            self.handle_notification(&request.method);
            return None;
        }

        let JsonRpcRequest { id, method, params, .. } = request;
        let id = id.unwrap_or(Value::Null);

        let response = match method.as_str() {
            "initialize" => self.handle_initialize(id, params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, params).await,
            _ => JsonRpcResponse::error_with(
                id,
                ErrorCode::MethodNotFound,
                format!("Method '{}' not found", method),
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                info!("MCP client finished initialization");
            }
            _ => debug!("Ignoring notification: {}", method),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();
        let client_name = params.client_info.map(|info| info.name);

        info!(
            client = client_name.as_deref().unwrap_or("unknown"),
            protocol = params.protocol_version.as_deref().unwrap_or("unspecified"),
            "MCP client connected"
        );

        // A client re-initializing on the same connection starts over
        self.close_session();

        let idle_timeout = self.tool_server.config().session_idle_timeout();
        match self.tool_server.sessions().prune_idle(idle_timeout) {
            Ok(pruned) if pruned > 0 => info!(pruned, "Dropped idle sessions"),
            Ok(_) => {}
            Err(e) => warn!("Failed to prune sessions: {}", e),
        }

        let opened = self.tool_server.sessions().create(client_name);
        match opened {
            Ok(session) => {
                info!(session = %session.id, "Session opened");
                self.session = Some(session.id);
            }
            Err(e) => warn!("Failed to open session: {}", e),
        }

        let config = self.tool_server.config();
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: config.server_name.clone(),
                version: config.server_version.clone(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools: Vec<ToolDefinition> = self
            .tool_server
            .registry()
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.parameter_schema().unwrap_or_else(empty_input_schema),
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let request: CallRequest = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(request) => request,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid parameters: {}", e)),
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing parameters"));
            }
        };

        match handle_tool_call(request, self.tool_server.registry()).await {
            Ok(envelope) => JsonRpcResponse::from_serializable(id, &envelope),
            Err(e) => {
                warn!("Rejected tool call: {}", e);
                JsonRpcResponse::error_with(id, e.code(), e.to_string())
            }
        }
    }

    fn record_activity(&self) {
        if let Some(session) = &self.session {
            if let Err(e) = self.tool_server.sessions().touch(session) {
                warn!("Failed to record session activity: {}", e);
            }
        }
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = self.tool_server.sessions().remove(&session) {
                debug!("Session already gone: {}", e);
            }
        }
    }
}
