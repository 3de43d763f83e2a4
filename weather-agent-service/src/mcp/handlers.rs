//! MCP message handlers.
//!
//! Handlers for initialize and tools/list requests.

use super::{McpError, McpState, SERVER_NAME, SUPPORTED_PROTOCOL_VERSIONS};

/// Handle initialize request.
///
/// Echoes the client's protocol version when we support it, otherwise offers
/// the newest revision we know.
pub fn handle_initialize(
    params: Option<&serde_json::Value>,
) -> Result<serde_json::Value, McpError> {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str());

    let latest = SUPPORTED_PROTOCOL_VERSIONS
        .last()
        .copied()
        .unwrap_or("2024-11-05");
    let protocol_version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(latest);

    Ok(serde_json::json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": "Demo weather server. Call get_weather with an exact city name such as \"Beijing\"."
    }))
}

/// Handle tools/list request
pub fn handle_tools_list(state: &McpState) -> Result<serde_json::Value, McpError> {
    let tools = state.registry.mcp_definitions();
    Ok(serde_json::json!({ "tools": tools }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_negotiates_version() {
        let result =
            handle_initialize(Some(&serde_json::json!({ "protocolVersion": "2024-11-05" })))
                .unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "demo-weather");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);

        let result =
            handle_initialize(Some(&serde_json::json!({ "protocolVersion": "1999-01-01" })))
                .unwrap();
        assert_eq!(result["protocolVersion"], "2025-06-18");

        let result = handle_initialize(None).unwrap();
        assert_eq!(result["protocolVersion"], "2025-06-18");
    }

    #[test]
    fn test_tools_list_exposes_get_weather_only() {
        let result = handle_tools_list(&McpState::default()).unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "get_weather");
        assert_eq!(
            tools[0]["description"],
            "Get demo weather for a city (simplified example)"
        );
        assert_eq!(tools[0]["inputSchema"]["required"], serde_json::json!(["city"]));
    }
}
