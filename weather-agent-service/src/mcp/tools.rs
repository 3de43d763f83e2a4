//! MCP tool call handler.

use crate::tools::{ToolCall, ToolSurface};

use super::{INVALID_PARAMS, METHOD_NOT_FOUND, McpError, McpState};

/// Handle tools/call request
pub fn handle_tool_call(
    state: &McpState,
    params: Option<serde_json::Value>,
) -> Result<serde_json::Value, McpError> {
    let params = params.ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing tool name"))?;

    let exposed = state
        .registry
        .get_by_str(name)
        .is_some_and(|t| t.exposed_on(ToolSurface::Mcp));
    if !exposed {
        return Err(McpError::new(
            METHOD_NOT_FOUND,
            format!("Unknown tool: {}", name),
        ));
    }

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    // MCP has no call ids of its own; the JSON-RPC id is tracked by the caller
    let call = ToolCall {
        id: String::new(),
        tool: name.to_string(),
        args: arguments,
    };

    let result = state.registry.execute(&call, ToolSurface::Mcp);
    if result.is_error() {
        return Err(McpError::new(INVALID_PARAMS, result.text()));
    }

    Ok(serde_json::json!({
        "content": [{
            "type": "text",
            "text": result.text()
        }],
        "isError": false
    }))
}
