//! Tool definitions and types shared by the agent loop and the MCP server.
//!
//! This module contains:
//! - Core tool types (ToolCall, ToolResult)
//! - The surface a tool is exposed on (agent vs. MCP)
//! - Submodules for the registry, wire definitions and execution

pub mod definitions;
pub mod execution;
pub mod registry;

pub use definitions::{OllamaFunctionDefinition, OllamaToolDefinition};
pub use registry::{McpToolDefinition, REGISTRY, ToolName, ToolRegistry};

/// Which host a tool is being offered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSurface {
    /// The in-process agent loop
    Agent,
    /// External MCP clients
    Mcp,
}

/// Tool call from the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub tool: String,
    pub args: serde_json::Value,
}

/// Tool result to return to the LLM
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub outcome: ToolOutcome,
}

/// Tool execution outcome
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    Success { result: String },
    Error { error: String },
}

impl ToolResult {
    pub fn success(tool_call_id: String, result: String) -> Self {
        Self {
            tool_call_id,
            outcome: ToolOutcome::Success { result },
        }
    }

    pub fn error(tool_call_id: String, error: String) -> Self {
        Self {
            tool_call_id,
            outcome: ToolOutcome::Error { error },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Error { .. })
    }

    /// Text handed back to the model or MCP client
    pub fn text(&self) -> &str {
        match &self.outcome {
            ToolOutcome::Success { result } => result,
            ToolOutcome::Error { error } => error,
        }
    }
}
