//! Model Context Protocol server for the demo weather tool.
//!
//! JSON-RPC dispatch lives here and knows nothing about transports. Two
//! transports sit on top: newline-delimited stdio (`stdio`) and a plain HTTP
//! POST endpoint (`mcp_router`).

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::tools::{REGISTRY, ToolRegistry};

mod handlers;
pub mod stdio;
mod tools;

/// Name MCP clients see for this server
pub const SERVER_NAME: &str = "demo-weather";

/// Protocol revisions this server can speak, newest last
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// MCP server state
pub struct McpState {
    pub registry: &'static ToolRegistry,
}

impl Default for McpState {
    fn default() -> Self {
        Self {
            registry: &REGISTRY,
        }
    }
}

impl McpState {
    /// Dispatch one JSON-RPC message.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub fn dispatch(&self, request: McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, "MCP request received");

        let Some(id) = request.id else {
            debug!(method = %request.method, "MCP notification received");
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => handlers::handle_initialize(request.params.as_ref()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => handlers::handle_tools_list(self),
            "tools/call" => tools::handle_tool_call(self, request.params),
            _ => Err(McpError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(data) => McpResponse::result(id, data),
            Err(error) => McpResponse::error(id, error),
        })
    }

    /// Dispatch a raw JSON text frame, producing the serialized reply if any
    pub fn dispatch_text(&self, text: &str) -> Option<String> {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                let response = McpResponse::error(
                    serde_json::Value::Null,
                    McpError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                );
                return Some(response.to_json());
            }
        };

        let id = value.get("id").cloned();
        let response = match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.dispatch(request)?,
            Err(e) => McpResponse::error(
                id.unwrap_or(serde_json::Value::Null),
                McpError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            ),
        };

        Some(response.to_json())
    }
}

/// Build the MCP router
pub fn mcp_router() -> Router {
    let state = Arc::new(McpState::default());

    Router::new()
        .route("/", post(mcp_message_handler))
        .with_state(state)
}

/// MCP message handler - handles JSON-RPC style requests.
///
/// The body is parsed here rather than by an extractor so malformed frames
/// get a JSON-RPC error, the same as on stdio.
async fn mcp_message_handler(State(state): State<Arc<McpState>>, body: Bytes) -> Response {
    let text = String::from_utf8_lossy(&body);
    match state.dispatch_text(&text) {
        Some(reply) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            reply,
        )
            .into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

// MCP Protocol Types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    fn result(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: serde_json::Value, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
