use serde::{Deserialize, Serialize};
use std::time::Duration;

mod loader;

pub use loader::{load_config, load_config_from};

/// Model identifier the weather assistant is pinned to
pub const DEFAULT_MODEL: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";

/// System instruction describing the assistant role
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful weather assistant.";

/// Environment variable prefix (`WEATHER_AGENT__OLLAMA__BASE_URL`, ...)
pub const ENV_PREFIX: &str = "WEATHER_AGENT";

// ==================== Service Configuration ====================

/// Configuration shared by every binary in the workspace.
/// Loaded once at startup; nothing here changes while the process runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default = "default_ollama")]
    pub ollama: OllamaConfig,

    #[serde(default = "default_agent")]
    pub agent: AgentConfig,

    #[serde(default = "default_mcp")]
    pub mcp: McpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            ollama: default_ollama(),
            agent: default_agent(),
            mcp: default_mcp(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ollama-compatible chat backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl OllamaConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Agent construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Chat rounds that may end in tool calls before the agent gives up
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: u32,

    /// Sampling temperature. Unset leaves the backend default in place.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// MCP-over-HTTP configuration (the stdio server ignores this)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(default = "default_mcp_path")]
    pub path: String,

    #[serde(default = "default_mcp_enabled")]
    pub enabled: bool,
}

// ==================== Default Value Functions ====================

fn default_server() -> ServerConfig {
    ServerConfig {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ollama() -> OllamaConfig {
    OllamaConfig {
        base_url: default_ollama_url(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_agent() -> AgentConfig {
    AgentConfig {
        model: default_model(),
        system_prompt: default_system_prompt(),
        max_tool_iterations: default_max_tool_iterations(),
        temperature: None,
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_max_tool_iterations() -> u32 {
    8
}

fn default_mcp() -> McpConfig {
    McpConfig {
        path: default_mcp_path(),
        enabled: default_mcp_enabled(),
    }
}

fn default_mcp_path() -> String {
    "/mcp".to_string()
}

fn default_mcp_enabled() -> bool {
    true
}
