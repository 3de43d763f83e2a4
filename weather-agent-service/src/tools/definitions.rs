//! Tool definitions for Ollama's function calling format.
//!
//! The definitions themselves come from the unified registry in
//! `crate::tools::registry`; this module only holds the wire types.

use serde::{Deserialize, Serialize};

/// Tool definition for Ollama's tool format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OllamaFunctionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaFunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
