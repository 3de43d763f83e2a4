use axum::http::StatusCode;
use thiserror::Error;

/// Main service error type
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Ollama(#[from] OllamaError),

    #[error("{0}")]
    Agent(#[from] AgentError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Ollama client errors
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Connection failed to Ollama at {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Generation failed (status {status}): {message}")]
    Generation { status: u16, message: String },

    #[error("Invalid response from Ollama")]
    InvalidResponse {
        #[source]
        source: reqwest::Error,
    },
}

/// Agent loop errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Agent exceeded {limit} tool-calling rounds without a final answer")]
    ToolLoopExceeded { limit: u32 },

    #[error("Model returned an empty reply")]
    EmptyReply,
}

/// Errors surfaced by the invocation entry point.
///
/// Only two kinds reach the caller: a missing message (400) and everything
/// else (500). The detail of an internal failure is logged, never returned.
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("No message provided")]
    MissingMessage,

    #[error("Malformed request payload: {message}")]
    MalformedPayload { message: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl InvocationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvocationError::MissingMessage => StatusCode::BAD_REQUEST,
            InvocationError::MalformedPayload { .. } | InvocationError::Service(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> &'static str {
        match self {
            InvocationError::MissingMessage => "No message provided",
            _ => "Internal server error",
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
