/// Server configuration
///
/// Built once at startup (normally from command line arguments) and passed
/// to the server explicitly.

use chrono::Duration;

/// Longest idle timeout accepted, in seconds (30 days)
pub const MAX_SESSION_IDLE_SECS: u64 = 30 * 24 * 60 * 60;

/// Default idle timeout, in seconds
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Name reported to clients in `initialize`
    pub server_name: String,
    /// Version reported to clients in `initialize`
    pub server_version: String,
    /// Sessions idle longer than this are pruned
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "MCP Tool Server".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

impl ServerConfig {
    /// Idle timeout as a duration, clamped to `MAX_SESSION_IDLE_SECS`
    pub fn session_idle_timeout(&self) -> Duration {
        let secs = self.session_idle_secs.min(MAX_SESSION_IDLE_SECS);
        Duration::seconds(secs as i64)
    }
}
