//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! Stdout carries protocol frames only; logging must go to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::McpState;

/// Serve MCP on the process's stdin/stdout until stdin closes
pub async fn serve_stdio(state: &McpState) -> std::io::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(state, stdin, stdout).await
}

/// Serve MCP over any line-oriented reader/writer pair
pub async fn serve<R, W>(state: &McpState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("MCP stdio transport started");
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(reply) = state.dispatch_text(line) {
            debug!(bytes = reply.len(), "Writing MCP response");
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("MCP stdio transport closed");
    Ok(())
}
