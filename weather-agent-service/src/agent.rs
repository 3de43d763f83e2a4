//! Single-turn agentic loop with tool calling.

use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::{AgentError, ServiceResult};
use crate::ollama::{ChatBackend, ChatMessage, ChatRequest};
use crate::tools::{ToolRegistry, ToolSurface};

/// A pre-configured conversational agent.
///
/// Built once per process and shared by reference with every invocation.
/// Holds no conversation state: each call to [`Agent::respond`] starts from
/// the system prompt.
pub struct Agent<B> {
    backend: B,
    config: AgentConfig,
    registry: &'static ToolRegistry,
}

impl<B: ChatBackend> Agent<B> {
    pub fn new(backend: B, config: AgentConfig) -> Self {
        Self::with_registry(backend, config, &crate::tools::REGISTRY)
    }

    pub fn with_registry(backend: B, config: AgentConfig, registry: &'static ToolRegistry) -> Self {
        info!(
            model = %config.model,
            tools = registry.ollama_definitions().len(),
            "Agent initialized"
        );
        Self {
            backend,
            config,
            registry,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Answer one user message, running any tool calls the model requests
    pub async fn respond(&self, message: &str) -> ServiceResult<String> {
        let mut messages = vec![
            ChatMessage::system(self.config.system_prompt.clone()),
            ChatMessage::user(message),
        ];
        let tools = self.registry.ollama_definitions();

        for round in 0..=self.config.max_tool_iterations {
            let reply = self
                .backend
                .chat(ChatRequest {
                    model: self.config.model.clone(),
                    messages: messages.clone(),
                    tools: tools.clone(),
                    temperature: self.config.temperature,
                })
                .await?;

            if reply.tool_calls.is_empty() {
                if reply.content.trim().is_empty() {
                    return Err(AgentError::EmptyReply.into());
                }
                debug!(round, content_length = reply.content.len(), "Agent reply complete");
                return Ok(reply.content);
            }

            if round == self.config.max_tool_iterations {
                break;
            }

            messages.push(ChatMessage::assistant_tool_calls(
                reply.content.clone(),
                &reply.tool_calls,
            ));

            for call in &reply.tool_calls {
                let result = self.registry.execute(call, ToolSurface::Agent);

                if result.is_error() {
                    warn!(
                        tool_call_id = %call.id,
                        tool_name = %call.tool,
                        error = %result.text(),
                        "Tool execution failed"
                    );
                } else {
                    debug!(
                        tool_call_id = %call.id,
                        tool_name = %call.tool,
                        result = %result.text(),
                        "Tool execution succeeded"
                    );
                }

                messages.push(ChatMessage::tool(call.tool.clone(), result.text()));
            }
        }

        Err(AgentError::ToolLoopExceeded {
            limit: self.config.max_tool_iterations,
        }
        .into())
    }
}
