//! OpenAI-style chat-completion client
//!
//! POSTs `{model, messages, temperature, max_tokens}` to `<base>/chat/completions`
//! with a bearer token. Uses a long-lived reqwest::Client for connection pooling;
//! the timeout is applied per request.

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::models::{CallResult, SUCCESS_STATUS};
use crate::transport::{ChatTransport, CompletionRequest};
use crate::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Reusable chat-completion client (connection-pooled)
pub struct HttpChatClient {
    client: Client,
    api_key: String,
    url: String,
}

impl HttpChatClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: config.completions_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CallResult> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: [
                WireMessage { role: "system", content: &request.system },
                WireMessage { role: "user", content: &request.prompt },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            url = %self.url,
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_chars = request.prompt.len(),
            "Calling chat completion endpoint"
        );

        let started = Instant::now();

        let response = match self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(AgentError::Http(e)),
            Err(e) => {
                error!("Chat completion request failed: {}", e);
                return Ok(CallResult::transport_fault(describe_fault(&e)));
            }
        };

        let status = i32::from(response.status().as_u16());
        let headers = collect_headers(response.headers());

        let body_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                error!(status, "Failed to read chat completion body: {}", e);
                return Ok(CallResult::transport_fault(describe_fault(&e)));
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status != SUCCESS_STATUS {
            let message = error_text(status, &body_text);
            warn!(status, elapsed_ms, error = %message, "Chat completion returned error status");
            return Ok(CallResult::failure(status, message, headers));
        }

        let raw: Value = match serde_json::from_str(&body_text) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(status, elapsed_ms, "Chat completion body is not JSON: {}", e);
                return Ok(CallResult::failure(
                    status,
                    format!("invalid response body: {}", e),
                    headers,
                ));
            }
        };

        let text = answer_text(&raw);
        debug!(status, elapsed_ms, answer_chars = text.len(), "Chat completion received");

        Ok(CallResult::success(text, Some(raw), headers))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// `choices[0].message.content`, empty when any level is missing
fn answer_text(raw: &Value) -> String {
    raw.get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Best-effort error text: structured JSON error, then raw body, then the status
fn error_text(status: i32, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let structured = json
            .get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(Value::as_str);

        return match structured {
            Some(message) => message.to_string(),
            None => json.to_string(),
        };
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}

fn describe_fault(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TRANSPORT_FAULT_STATUS;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn client_for(api_base: String) -> HttpChatClient {
        let config = AgentConfig {
            api_key: "test-key".to_string(),
            api_base,
            model: "stub-model".to_string(),
            timeout: Duration::from_secs(5),
        };
        HttpChatClient::new(&config).unwrap()
    }

    async fn echo(headers: AxumHeaders, Json(body): Json<Value>) -> impl axum::response::IntoResponse {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let user = body["messages"][1]["content"].clone();

        (
            StatusCode::OK,
            [("x-stub", "echo")],
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": user } }],
                "echo": body,
                "auth": auth,
            })),
        )
    }

    #[tokio::test]
    async fn test_success_sends_expected_shape() {
        let base = spawn_stub(Router::new().route("/v1/chat/completions", post(echo))).await;
        let client = client_for(base);

        let request = CompletionRequest::new("What is 2+2?", &AgentConfig {
            model: "stub-model".to_string(),
            ..AgentConfig::default()
        })
        .with_system("be brief")
        .with_max_tokens(64);

        let result = client.complete(&request).await.unwrap();

        assert!(result.is_ok());
        assert_eq!(result.status(), 200);
        assert_eq!(result.text(), "What is 2+2?");
        assert_eq!(result.headers().get("x-stub").map(String::as_str), Some("echo"));

        let raw = result.raw().unwrap();
        assert_eq!(raw["auth"], "Bearer test-key");
        assert_eq!(raw["echo"]["model"], "stub-model");
        assert_eq!(raw["echo"]["max_tokens"], 64);
        assert_eq!(raw["echo"]["temperature"], 0.0);
        assert_eq!(raw["echo"]["messages"][0]["role"], "system");
        assert_eq!(raw["echo"]["messages"][0]["content"], "be brief");
        assert_eq!(raw["echo"]["messages"][1]["role"], "user");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_success() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn_stub(router).await);

        let request = CompletionRequest::new("hi", &AgentConfig::default());
        let result = client.complete(&request).await.unwrap();

        assert!(result.is_ok());
        assert_eq!(result.text(), "");
        assert!(result.error().is_none());
    }

    #[tokio::test]
    async fn test_error_status_prefers_json_message() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": { "message": "model overloaded" } })),
                )
            }),
        );
        let client = client_for(spawn_stub(router).await);

        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await
            .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status(), 500);
        assert_eq!(result.error(), Some("model overloaded"));
        assert_eq!(result.text(), "");
    }

    #[tokio::test]
    async fn test_error_status_falls_back_to_raw_text() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream went away") }),
        );
        let client = client_for(spawn_stub(router).await);

        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await
            .unwrap();

        assert_eq!(result.status(), 502);
        assert_eq!(result.error(), Some("upstream went away"));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_failure() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { "<html>oops</html>" }),
        );
        let client = client_for(spawn_stub(router).await);

        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await
            .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status(), 200);
        assert!(result.error().unwrap().starts_with("invalid response body"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_fault() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/v1", addr));
        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await
            .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status(), TRANSPORT_FAULT_STATUS);
        assert!(!result.error().unwrap().is_empty());
        assert!(result.headers().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_transport_fault() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let client = client_for(spawn_stub(router).await);

        let request = CompletionRequest::new("hi", &AgentConfig::default())
            .with_timeout(Duration::from_millis(100));
        let result = client.complete(&request).await.unwrap();

        assert_eq!(result.status(), TRANSPORT_FAULT_STATUS);
        assert!(result.error().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_dropped_mid_body_is_transport_fault() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"choices\"",
                )
                .await;
        });

        let client = client_for(format!("http://{}/v1", addr));
        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await
            .unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status(), TRANSPORT_FAULT_STATUS);
        assert!(!result.error().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_is_internal_error() {
        let client = client_for("not a url".to_string());
        let result = client
            .complete(&CompletionRequest::new("hi", &AgentConfig::default()))
            .await;

        assert!(matches!(result, Err(AgentError::Http(_))));
    }

    #[test]
    fn test_error_text_variants() {
        assert_eq!(error_text(500, r#"{"error":"plain"}"#), "plain");
        assert_eq!(error_text(500, r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
        assert_eq!(error_text(503, "  "), "HTTP 503");
    }

    #[test]
    fn test_answer_text_paths() {
        let raw = json!({ "choices": [{ "message": { "content": "Final answer: 4" } }] });
        assert_eq!(answer_text(&raw), "Final answer: 4");
        assert_eq!(answer_text(&json!({ "choices": [{ "message": {} }] })), "");
        assert_eq!(answer_text(&json!({})), "");
    }
}
