pub mod errors;

pub use errors::RelayError;

use std::sync::Arc;

use tracing::error;
use url::Url;

use crate::backend::Backend;

/// The relay: one outbound HTTP call per prompt, no retry, no backoff.
pub struct Relay {
    backend: Arc<dyn Backend>,
    client: reqwest::Client,
}

impl Relay {
    pub fn new(backend: Arc<dyn Backend>, client: reqwest::Client) -> Self {
        Self { backend, client }
    }

    /// Name of the configured backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Forward a prompt verbatim to the backend and return the extracted
    /// completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String, RelayError> {
        let endpoint = join_endpoint(self.backend.base_url(), self.backend.generate_path())
            .map_err(RelayError::InvalidEndpoint)?;

        let body = self.backend.request_body(prompt);

        let mut req = self
            .client
            .post(&endpoint)
            .json(&body)
            .build()
            .map_err(|e| RelayError::Request(e.to_string()))?;

        self.backend.authorize_request(req.headers_mut());

        let resp = match self.client.execute(req).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    backend = self.backend.name(),
                    url = endpoint,
                    error = %e,
                    "upstream request failed"
                );
                return Err(RelayError::Request(e.to_string()));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            error!(
                backend = self.backend.name(),
                url = endpoint,
                status = status.as_u16(),
                "upstream returned error status"
            );
            return Err(RelayError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;

        self.backend.extract_text(&payload)
    }
}

/// Build the upstream URL from base URL and endpoint path.
pub fn join_endpoint(base_url: &str, path: &str) -> Result<String, String> {
    let mut parsed = Url::parse(base_url).map_err(|e| e.to_string())?;

    let normalized_base = parsed.path().trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');

    let full_path = if normalized_base.is_empty() || normalized_base == "/" {
        format!("/{trimmed_path}")
    } else {
        format!("{normalized_base}/{trimmed_path}")
    };

    parsed.set_path(&full_path);
    parsed.set_query(None);

    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::Mutex;

    use crate::backend::{Ollama, OllamaConfig};

    #[test]
    fn test_join_endpoint() {
        let got = join_endpoint("http://localhost:11434", "/api/generate").unwrap();
        assert_eq!(got, "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_join_endpoint_trims_base_path() {
        let got = join_endpoint("https://inference.example.com/api/", "/v1/chat/completions")
            .unwrap();
        assert_eq!(got, "https://inference.example.com/api/v1/chat/completions");
    }

    #[test]
    fn test_join_endpoint_invalid_base_url() {
        assert!(join_endpoint("://bad", "/api/generate").is_err());
    }

    fn ollama_relay(base_url: &str) -> Relay {
        let backend = Arc::new(Ollama::new(OllamaConfig {
            base_url: Some(base_url.to_string()),
            model: "qwen3".into(),
        }));
        Relay::new(backend, reqwest::Client::new())
    }

    /// Stub upstream that records the last request body and replies with a
    /// fixed completion.
    async fn spawn_stub(reply: serde_json::Value) -> (String, Arc<Mutex<Option<serde_json::Value>>>) {
        let seen = Arc::new(Mutex::new(None));
        let recorded = seen.clone();

        let app = Router::new().route(
            "/api/generate",
            post(move |Json(body): Json<serde_json::Value>| {
                let recorded = recorded.clone();
                let reply = reply.clone();
                async move {
                    *recorded.lock().unwrap() = Some(body);
                    Json(reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), seen)
    }

    #[tokio::test]
    async fn test_generate_forwards_prompt_and_extracts_response() {
        let (base_url, seen) = spawn_stub(json!({"response": "hi there"})).await;
        let relay = ollama_relay(&base_url);

        let text = relay.generate("hello").await.unwrap();
        assert_eq!(text, "hi there");

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["prompt"], json!("hello"));
        assert_eq!(body["model"], json!("qwen3"));
    }

    #[tokio::test]
    async fn test_generate_forwards_empty_prompt() {
        let (base_url, seen) = spawn_stub(json!({"response": ""})).await;
        let relay = ollama_relay(&base_url);

        relay.generate("").await.unwrap();

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["prompt"], json!(""));
    }

    #[tokio::test]
    async fn test_generate_unreachable_upstream() {
        // Nothing listens on this port.
        let relay = ollama_relay("http://127.0.0.1:1");
        let err = relay.generate("hello").await.unwrap_err();
        assert!(matches!(err, RelayError::Request(_)));
    }

    #[tokio::test]
    async fn test_generate_non_2xx_status() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let relay = ollama_relay(&format!("http://{addr}"));
        let err = relay.generate("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "upstream returned status 500");
    }

    #[tokio::test]
    async fn test_generate_malformed_payload() {
        let (base_url, _) = spawn_stub(json!({"done": true})).await;
        let relay = ollama_relay(&base_url);

        let err = relay.generate("hello").await.unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(_)));
    }
}
