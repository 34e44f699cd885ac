/// Public library interface for the MCP tool server
///
/// This module exports the server, the tool call core (invoker and result
/// normalizer), and the types tools and tests work with.

use std::sync::Arc;
use thiserror::Error;

// Internal modules
mod config;
mod domain;
mod mcp;
mod normalize;
mod session;
mod tools;

// Re-export public modules and types
pub use config::{ServerConfig, DEFAULT_SESSION_IDLE_SECS};
pub use domain::*;
pub use domain::validation::{
    claims_envelope, is_plain_object, json_type_name, validate_content_block, validate_envelope,
};
pub use mcp::protocol::{ErrorCode, JsonRpcError, JsonRpcResponse, MCP_VERSION};
pub use mcp::McpServer;
pub use normalize::{
    normalize, normalize_error, normalize_safe, render_object, MAX_FALLBACK_CHARS,
    MAX_RENDERED_CHARS, TRUNCATION_MARKER, UNRENDERABLE_PLACEHOLDER,
};
pub use session::{InMemorySessionStore, Session, SessionError, SessionId, SessionStore};
pub use tools::{
    builtin_registry, handle_tool_call, AddTool, CurrentTimeTool, EchoTool, Tool, ToolCallError,
    ToolRegistry,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session store error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tool server that implements the MCP protocol
///
/// Holds the tool registry, the session store and the configuration. All
/// three are constructed by the caller and passed in; nothing is global.
pub struct ToolServer {
    registry: ToolRegistry,
    sessions: Arc<dyn SessionStore>,
    config: ServerConfig,
}

impl ToolServer {
    /// Create a server with an in-memory session store
    pub fn new(registry: ToolRegistry, config: ServerConfig) -> Self {
        Self::with_session_store(registry, Arc::new(InMemorySessionStore::new()), config)
    }

    /// Create a server with a caller-supplied session store
    pub fn with_session_store(
        registry: ToolRegistry,
        sessions: Arc<dyn SessionStore>,
        config: ServerConfig,
    ) -> Self {
        tracing::info!(
            tools = registry.len(),
            "Initializing {} {}",
            config.server_name,
            config.server_version
        );

        Self {
            registry,
            sessions,
            config,
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started successfully, serving {} tools",
            self.registry.len()
        );

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Get a reference to the session store
    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
