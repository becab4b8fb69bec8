use serde_json::json;

use super::Backend;
use crate::relay::RelayError;

/// Ollama backend configuration.
pub struct OllamaConfig {
    pub base_url: Option<String>,
    pub model: String,
}

/// Ollama backend: a local daemon exposing `POST /api/generate`.
pub struct Ollama {
    base_url: String,
    model: String,
}

impl Ollama {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            base_url: config
                .base_url
                .unwrap_or_else(|| "http://localhost:11434".into()),
            model: config.model,
        }
    }
}

impl Backend for Ollama {
    fn name(&self) -> &str {
        "ollama"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_path(&self) -> &str {
        "/api/generate"
    }

    fn authorize_request(&self, _headers: &mut http::HeaderMap) {
        // Local daemon, no credential.
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        })
    }

    fn extract_text(&self, body: &serde_json::Value) -> Result<String, RelayError> {
        body.get("response")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| RelayError::MalformedResponse("missing \"response\" field".into()))
    }
}
