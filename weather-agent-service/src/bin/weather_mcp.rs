//! Demo weather MCP server speaking JSON-RPC over stdio.

use tracing::info;

use weather_agent_service::logging::{LogFormat, init_logging};
use weather_agent_service::mcp::{McpState, SERVER_NAME, stdio};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogFormat::Stderr);

    info!(
        server = SERVER_NAME,
        version = env!("CARGO_PKG_VERSION"),
        "Starting MCP server on stdio"
    );

    let state = McpState::default();
    stdio::serve_stdio(&state).await?;

    Ok(())
}
