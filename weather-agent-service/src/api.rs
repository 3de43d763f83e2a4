//! HTTP API for the weather agent.
//!
//! This module provides:
//! - `POST /invoke`, the invocation entry point served over plain HTTP
//! - `GET /health`
//! - The MCP endpoint, nested at the configured path

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::Agent;
use crate::config::ServiceConfig;
use crate::handler::{InvocationEvent, handle_invocation};
use crate::mcp;
use crate::ollama::ChatBackend;

/// Application state
pub struct AppState<B> {
    pub agent: Arc<Agent<B>>,
    pub start_time: Instant,
}

/// Build the API router
pub fn router<B>(agent: Arc<Agent<B>>, config: &ServiceConfig) -> Router
where
    B: ChatBackend + 'static,
{
    let state = Arc::new(AppState {
        agent,
        start_time: Instant::now(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_handler::<B>))
        .route("/invoke", post(invoke_handler::<B>))
        .with_state(state);

    if config.mcp.enabled {
        info!(path = %config.mcp.path, "MCP server enabled");
        app = app.nest(&config.mcp.path, mcp::mcp_router());
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

// === Invocation ===

async fn invoke_handler<B: ChatBackend>(
    State(state): State<Arc<AppState<B>>>,
    body: Bytes,
) -> Response {
    let event = InvocationEvent::from_bytes(&body);
    let response = handle_invocation(state.agent.as_ref(), &event).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

// === Health ===

async fn health_handler<B: ChatBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Json<HealthResponse> {
    let backend_available = state.agent.backend().is_available().await;

    let status = if backend_available {
        "healthy".to_string()
    } else {
        "degraded: chat backend unavailable".to_string()
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.agent.config().model.clone(),
        backend_available,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_seconds: u64,
    model: String,
    backend_available: bool,
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::agent::tests::ScriptedBackend;
    use crate::error::ServiceError;
    use crate::ollama::ChatReply;

    fn app(replies: Vec<crate::error::ServiceResult<ChatReply>>) -> Router {
        let config = ServiceConfig::default();
        let agent = Arc::new(Agent::new(
            ScriptedBackend::new(replies),
            config.agent.clone(),
        ));
        router(agent, &config)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let (status, body) = send(
            app(vec![Ok(ChatReply::text("hi there"))]),
            post("/invoke", r#"{"message":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "message": "hi there" }));
    }

    #[tokio::test]
    async fn test_invoke_empty_body() {
        let (status, body) = send(app(vec![]), post("/invoke", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "No message provided" }));
    }

    #[tokio::test]
    async fn test_invoke_non_utf8_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/invoke")
            .body(Body::from(vec![0xff, 0xfe, b'{']))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_invoke_backend_failure() {
        let (status, body) = send(
            app(vec![Err(ServiceError::Internal {
                message: "connection reset".to_string(),
            })]),
            post("/invoke", r#"{"message":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend_available"], true);
        assert_eq!(body["model"], crate::config::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_mcp_nested() {
        let (status, body) = send(
            app(vec![]),
            post(
                "/mcp",
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"get_weather","arguments":{"city":"Beijing"}}}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["content"][0]["text"], "Sunny, 25°C");
    }

    #[tokio::test]
    async fn test_mcp_parse_error() {
        let (status, body) = send(app(vec![]), post("/mcp", "{not json")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], serde_json::Value::Null);
        assert_eq!(body["error"]["code"], crate::mcp::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_mcp_without_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/mcp")
            .body(Body::from(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
        assert_eq!(body["result"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_mcp_notification_accepted() {
        let (status, body) = send(
            app(vec![]),
            post("/mcp", r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_null());
    }
}
