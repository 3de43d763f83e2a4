use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

use crate::config::OllamaConfig;
use crate::error::{OllamaError, ServiceError, ServiceResult};
use crate::tools::{OllamaToolDefinition, ToolCall};

/// A chat completion backend the agent can drive.
///
/// One request in, one complete (non-streamed) reply out.
pub trait ChatBackend: Send + Sync {
    fn chat(&self, request: ChatRequest) -> impl Future<Output = ServiceResult<ChatReply>> + Send;

    /// Whether the backend is reachable right now
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        async { true }
    }
}

/// Ollama API client
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: OllamaConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ServiceError::Ollama(OllamaError::Connection {
                    url: config.base_url.clone(),
                    source: e,
                })
            })?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Check if Ollama is available
    pub async fn health_check(&self) -> ServiceResult<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                warn!(error = %e, "Ollama health check failed");
                Ok(false)
            }
        }
    }
}

impl ChatBackend for OllamaClient {
    async fn is_available(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }

    async fn chat(&self, request: ChatRequest) -> ServiceResult<ChatReply> {
        let url = format!("{}/api/chat", self.config.base_url);
        let model = request.model.clone();

        let body = OllamaChatRequest {
            model: request.model,
            messages: request.messages,
            tools: request.tools,
            stream: false,
            options: request.temperature.map(|temperature| OllamaOptions {
                temperature: Some(temperature),
            }),
        };

        debug!(
            model = %model,
            message_count = body.messages.len(),
            tool_count = body.tools.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OllamaError::Connection {
                url: url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            if message.contains("model") && message.contains("not found") {
                return Err(ServiceError::Ollama(OllamaError::ModelNotFound { model }));
            }

            return Err(ServiceError::Ollama(OllamaError::Generation {
                status,
                message,
            }));
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::InvalidResponse { source: e })?;

        Ok(chat_response.message.into())
    }
}

/// Request handed to a [`ChatBackend`]
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<OllamaToolDefinition>,
    pub temperature: Option<f32>,
}

/// A complete reply: either final content, tool calls, or both
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OllamaToolCall>>,
    /// Name of the tool whose output this message carries (role "tool")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain("user", content)
    }

    /// Echo of an assistant turn that requested tools
    pub fn assistant_tool_calls(content: impl Into<String>, calls: &[ToolCall]) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: Some(calls.iter().map(OllamaToolCall::from).collect()),
            tool_name: None,
        }
    }

    pub fn tool(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: None,
            tool_name: Some(tool_name.into()),
        }
    }

    fn plain(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_calls: None,
            tool_name: None,
        }
    }
}

/// Tool call in Ollama's wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function: OllamaFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl From<&ToolCall> for OllamaToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: Some(call.id.clone()),
            function: OllamaFunctionCall {
                name: call.tool.clone(),
                arguments: call.args.clone(),
            },
        }
    }
}

impl From<OllamaToolCall> for ToolCall {
    fn from(call: OllamaToolCall) -> Self {
        Self {
            // Older Ollama builds omit call ids
            id: call
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            tool: call.function.name,
            args: call.function.arguments,
        }
    }
}

// Internal Ollama API types

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OllamaToolDefinition>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    tool_calls: Vec<OllamaToolCall>,
}

impl From<OllamaMessage> for ChatReply {
    fn from(message: OllamaMessage) -> Self {
        Self {
            content: message.content,
            tool_calls: message.tool_calls.into_iter().map(ToolCall::from).collect(),
        }
    }
}
