//! Serverless invocation entry point.
//!
//! Translates an API-Gateway-shaped event into a single agent call and the
//! agent's reply (or failure) back into a `{statusCode, body}` response.

use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::agent::Agent;
use crate::error::{InvocationError, ServiceResult};
use crate::ollama::ChatBackend;

/// Anything that can turn one user message into one reply
pub trait Respond: Send + Sync {
    fn respond(&self, message: &str) -> impl Future<Output = ServiceResult<String>> + Send;
}

impl<B: ChatBackend> Respond for Agent<B> {
    async fn respond(&self, message: &str) -> ServiceResult<String> {
        Agent::respond(self, message).await
    }
}

/// Incoming event. Only the body matters; every other gateway field is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default, rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

impl InvocationEvent {
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Event for a raw request body. An empty body reads as absent; bytes
    /// that are not UTF-8 travel base64-encoded, as API Gateway sends them.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::from_body(text),
            Err(_) => Self {
                body: Some(BASE64.encode(bytes)),
                is_base64_encoded: true,
            },
        }
    }
}

/// Outgoing response with a serialized JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    fn json(status_code: u16, body: serde_json::Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InvocationRequest {
    #[serde(default)]
    message: serde_json::Value,
}

/// Handle one invocation against an already-constructed responder
pub async fn handle_invocation<R: Respond>(
    responder: &R,
    event: &InvocationEvent,
) -> InvocationResponse {
    match process(responder, event).await {
        Ok(reply) => InvocationResponse::json(200, serde_json::json!({ "message": reply })),
        Err(e) => {
            if e.is_internal() {
                error!(error = %e, "Invocation failed");
            } else {
                warn!(error = %e, "Invocation rejected");
            }
            InvocationResponse::json(
                e.status_code().as_u16(),
                serde_json::json!({ "error": e.public_message() }),
            )
        }
    }
}

async fn process<R: Respond>(
    responder: &R,
    event: &InvocationEvent,
) -> Result<String, InvocationError> {
    let message = extract_message(event)?;
    info!(message_length = message.len(), "Invoking agent");
    Ok(responder.respond(&message).await?)
}

/// Pull the user message out of the event body.
///
/// A missing or `null` body reads as `{}`. Any falsy `message` (absent,
/// `null`, `""`, `0`, `false`, `[]`, `{}`) is a missing message; any other
/// non-string is malformed.
fn extract_message(event: &InvocationEvent) -> Result<String, InvocationError> {
    let raw = match (&event.body, event.is_base64_encoded) {
        (None, _) => "{}".to_string(),
        (Some(body), false) => body.clone(),
        (Some(body), true) => {
            let bytes = BASE64
                .decode(body)
                .map_err(|e| InvocationError::MalformedPayload {
                    message: format!("invalid base64 body: {}", e),
                })?;
            String::from_utf8(bytes).map_err(|e| InvocationError::MalformedPayload {
                message: format!("body is not UTF-8: {}", e),
            })?
        }
    };

    let request: InvocationRequest =
        serde_json::from_str(&raw).map_err(|e| InvocationError::MalformedPayload {
            message: e.to_string(),
        })?;

    match request.message {
        serde_json::Value::String(message) if !message.is_empty() => Ok(message),
        value if is_falsy(&value) => Err(InvocationError::MissingMessage),
        value => Err(InvocationError::MalformedPayload {
            message: format!("message must be a string, got {}", value),
        }),
    }
}

fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ServiceError;

    /// Responder with a fixed outcome that counts how often it was called
    struct StubResponder {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl StubResponder {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(detail: &'static str) -> Self {
            Self {
                reply: Err(detail),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Respond for StubResponder {
        async fn respond(&self, _message: &str) -> ServiceResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(detail) => Err(ServiceError::Internal {
                    message: detail.to_string(),
                }),
            }
        }
    }

    fn body_json(response: &InvocationResponse) -> serde_json::Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_success_wraps_reply() {
        let stub = StubResponder::replying("hi there");
        let response =
            handle_invocation(&stub, &InvocationEvent::from_body(r#"{"message":"hello"}"#)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(body_json(&response), serde_json::json!({ "message": "hi there" }));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_or_empty_message_is_rejected() {
        let events = [
            InvocationEvent::default(),
            InvocationEvent::from_body("{}"),
            InvocationEvent::from_body(r#"{"message":""}"#),
            InvocationEvent::from_body(r#"{"message":null}"#),
            InvocationEvent::from_body(r#"{"text":"hello"}"#),
            InvocationEvent::from_body(r#"{"message":0}"#),
            InvocationEvent::from_body(r#"{"message":false}"#),
            InvocationEvent::from_body(r#"{"message":[]}"#),
            InvocationEvent::from_body(r#"{"message":{}}"#),
        ];

        for event in &events {
            let stub = StubResponder::replying("unused");
            let response = handle_invocation(&stub, event).await;
            assert_eq!(response.status_code, 400, "{event:?}");
            assert_eq!(
                body_json(&response),
                serde_json::json!({ "error": "No message provided" })
            );
            assert_eq!(stub.calls(), 0, "agent must not be invoked for {event:?}");
        }
    }

    #[tokio::test]
    async fn test_responder_failure_is_hidden() {
        let stub = StubResponder::failing("secret stack detail");
        let response =
            handle_invocation(&stub, &InvocationEvent::from_body(r#"{"message":"hello"}"#)).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            body_json(&response),
            serde_json::json!({ "error": "Internal server error" })
        );
        assert!(!response.body.contains("secret stack detail"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal_error() {
        for body in [
            "not json",
            r#""hello""#,
            r#"{"message": 5}"#,
            r#"{"message": true}"#,
            r#"{"message": ["hi"]}"#,
        ] {
            let stub = StubResponder::replying("unused");
            let response = handle_invocation(&stub, &InvocationEvent::from_body(body)).await;
            assert_eq!(response.status_code, 500, "{body}");
            assert_eq!(
                body_json(&response),
                serde_json::json!({ "error": "Internal server error" })
            );
            assert_eq!(stub.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_base64_body_is_decoded() {
        let stub = StubResponder::replying("decoded");
        let event = InvocationEvent {
            body: Some(BASE64.encode(r#"{"message":"hello"}"#)),
            is_base64_encoded: true,
        };

        let response = handle_invocation(&stub, &event).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_raw_bytes_event() {
        assert!(InvocationEvent::from_bytes(b"").body.is_none());

        let event = InvocationEvent::from_bytes(br#"{"message":"hello"}"#);
        assert!(!event.is_base64_encoded);
        let stub = StubResponder::replying("ok");
        assert_eq!(handle_invocation(&stub, &event).await.status_code, 200);

        let event = InvocationEvent::from_bytes(&[0xff, 0xfe, b'{']);
        assert!(event.is_base64_encoded);
        let stub = StubResponder::replying("unused");
        let response = handle_invocation(&stub, &event).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(
            body_json(&response),
            serde_json::json!({ "error": "Internal server error" })
        );
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_gateway_event_shape() {
        let event: InvocationEvent = serde_json::from_value(serde_json::json!({
            "resource": "/invoke",
            "httpMethod": "POST",
            "headers": { "content-type": "application/json" },
            "body": "{\"message\":\"hi\"}",
            "isBase64Encoded": false
        }))
        .unwrap();
        assert_eq!(event.body.as_deref(), Some(r#"{"message":"hi"}"#));

        let null_body: InvocationEvent =
            serde_json::from_value(serde_json::json!({ "body": null })).unwrap();
        assert!(null_body.body.is_none());

        let response = serde_json::to_value(InvocationResponse {
            status_code: 200,
            body: "{}".to_string(),
        })
        .unwrap();
        assert_eq!(response, serde_json::json!({ "statusCode": 200, "body": "{}" }));
    }
}
