/// Main entry point for the MCP tool server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_tool_server::{builtin_registry, ServerConfig, ToolServer, DEFAULT_SESSION_IDLE_SECS};

/// Command line arguments for the MCP tool server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name reported to clients during initialization
    #[arg(long)]
    server_name: Option<String>,

    /// Seconds of inactivity after which a session is dropped
    #[arg(long, default_value_t = DEFAULT_SESSION_IDLE_SECS)]
    session_idle_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            server_name: self.server_name.unwrap_or(defaults.server_name),
            session_idle_secs: self.session_idle_secs,
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags; RUST_LOG wins when set
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mcp_tool_server={}", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Send logs to stderr, not stdout
        .init();

    info!("Starting MCP tool server");

    let config = args.into_config();
    let server = ToolServer::new(builtin_registry(), config);

    // Run the MCP server - this will handle JSON-RPC communication over stdin/stdout
    server.run().await?;

    info!("MCP tool server shutdown complete");
    Ok(())
}
