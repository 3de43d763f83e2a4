//! Unified tool registry for both the agent loop and the MCP server.
//!
//! Tool names are derived from enum variants via strum, so the name an MCP
//! client calls and the name the model is offered can never drift apart.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::execution::{GetWeatherArgs, WeatherInfoArgs, execute_tool};
use super::{OllamaFunctionDefinition, OllamaToolDefinition, ToolCall, ToolResult, ToolSurface};

/// All tool names as an exhaustive enum.
///
/// Adding a new tool requires a variant here, metadata in `register_all_tools`
/// and an arm in `execution::execute_tool` (the match there is exhaustive).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Demo weather served over MCP (exact-case city names)
    GetWeather,
    /// Mock weather offered to the agent (case-insensitive locations)
    WeatherInfo,
}

/// Metadata for a tool definition.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    /// Tool identifier - string representation derived via strum Display
    pub name: ToolName,

    /// Whether to offer the tool to the agent loop
    pub agent_enabled: bool,

    /// Whether to expose via MCP server
    pub mcp_enabled: bool,

    /// Tool description (shared between the agent and MCP)
    pub description: &'static str,

    /// JSON Schema for tool parameters (called lazily to avoid static initialization issues)
    pub parameters: fn() -> serde_json::Value,
}

impl ToolMetadata {
    pub fn exposed_on(&self, surface: ToolSurface) -> bool {
        match surface {
            ToolSurface::Agent => self.agent_enabled,
            ToolSurface::Mcp => self.mcp_enabled,
        }
    }
}

/// Central registry of all tools.
pub struct ToolRegistry {
    tools: HashMap<ToolName, ToolMetadata>,
}

impl ToolRegistry {
    /// Build the registry from all registered tool definitions
    fn new() -> Self {
        let mut tools = HashMap::new();
        register_all_tools(&mut tools);
        Self { tools }
    }

    /// Tools exposed on `surface`, in declaration order
    fn exposed(&self, surface: ToolSurface) -> impl Iterator<Item = &ToolMetadata> {
        ToolName::iter()
            .filter_map(|name| self.tools.get(&name))
            .filter(move |t| t.exposed_on(surface))
    }

    /// Get the agent's tools as Ollama tool definitions
    pub fn ollama_definitions(&self) -> Vec<OllamaToolDefinition> {
        self.exposed(ToolSurface::Agent)
            .map(|t| OllamaToolDefinition {
                tool_type: "function".to_string(),
                function: OllamaFunctionDefinition {
                    name: t.name.to_string(),
                    description: t.description.to_string(),
                    parameters: (t.parameters)(),
                },
            })
            .collect()
    }

    /// Get all MCP-exposed tools as MCP tool definitions
    pub fn mcp_definitions(&self) -> Vec<McpToolDefinition> {
        self.exposed(ToolSurface::Mcp)
            .map(|t| McpToolDefinition {
                name: t.name.to_string(),
                description: t.description.to_string(),
                input_schema: (t.parameters)(),
            })
            .collect()
    }

    /// Get metadata by string name
    pub fn get_by_str(&self, name: &str) -> Option<&ToolMetadata> {
        ToolName::from_str(name)
            .ok()
            .and_then(|n| self.tools.get(&n))
    }

    /// Run a tool call on behalf of `surface`.
    ///
    /// Tools not exposed on that surface are reported as unknown, the same as
    /// names that do not exist at all.
    pub fn execute(&self, call: &ToolCall, surface: ToolSurface) -> ToolResult {
        let Some(metadata) = self
            .get_by_str(&call.tool)
            .filter(|t| t.exposed_on(surface))
        else {
            return ToolResult::error(call.id.clone(), format!("Unknown tool: {}", call.tool));
        };

        match execute_tool(metadata.name, &call.args) {
            Ok(text) => ToolResult::success(call.id.clone(), text),
            Err(error) => ToolResult::error(call.id.clone(), error),
        }
    }
}

/// Global singleton registry instance
pub static REGISTRY: LazyLock<ToolRegistry> = LazyLock::new(ToolRegistry::new);

/// MCP tool definition structure (for output generation)
#[derive(Debug, Clone, Serialize)]
pub struct McpToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

fn register_all_tools(tools: &mut HashMap<ToolName, ToolMetadata>) {
    tools.insert(
        ToolName::GetWeather,
        ToolMetadata {
            name: ToolName::GetWeather,
            agent_enabled: false,
            mcp_enabled: true,
            description: "Get demo weather for a city (simplified example)",
            parameters: parameters_schema::<GetWeatherArgs>,
        },
    );

    tools.insert(
        ToolName::WeatherInfo,
        ToolMetadata {
            name: ToolName::WeatherInfo,
            agent_enabled: true,
            mcp_enabled: false,
            description: "Get weather information for a location.",
            parameters: parameters_schema::<WeatherInfoArgs>,
        },
    );
}

/// JSON Schema for a tool's argument struct, without the root-only keys
fn parameters_schema<T: JsonSchema>() -> serde_json::Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default();
    if let Some(map) = schema.as_object_mut() {
        map.remove("$schema");
        map.remove("title");
    }
    schema
}
