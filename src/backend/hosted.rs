use serde_json::json;

use super::Backend;
use crate::relay::RelayError;

/// Hosted backend configuration.
pub struct HostedConfig {
    pub base_url: Option<String>,
    pub api_key: String,
    pub model: String,
}

/// Hosted backend: an OpenAI-compatible chat-completions API behind a bearer
/// credential.
pub struct Hosted {
    base_url: String,
    api_key: String,
    model: String,
}

impl Hosted {
    pub fn new(config: HostedConfig) -> Self {
        Self {
            base_url: config
                .base_url
                .unwrap_or_else(|| "https://api.openai.com".into()),
            api_key: config.api_key,
            model: config.model,
        }
    }
}

impl Backend for Hosted {
    fn name(&self) -> &str {
        "hosted"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_path(&self) -> &str {
        "/v1/chat/completions"
    }

    fn authorize_request(&self, headers: &mut http::HeaderMap) {
        if let Ok(value) = format!("Bearer {}", self.api_key).parse() {
            headers.insert(http::header::AUTHORIZATION, value);
        }
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
        })
    }

    fn extract_text(&self, body: &serde_json::Value) -> Result<String, RelayError> {
        body.pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                RelayError::MalformedResponse("missing choices[0].message.content".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> Hosted {
        Hosted::new(HostedConfig {
            base_url: None,
            api_key: "sk-test".into(),
            model: "gpt-4o-mini".into(),
        })
    }

    #[test]
    fn test_request_body_carries_prompt_verbatim() {
        let body = backend().request_body("hello");
        assert_eq!(body["messages"][0]["content"], json!("hello"));
        assert_eq!(body["model"], json!("gpt-4o-mini"));
    }

    #[test]
    fn test_authorization_header_is_bearer() {
        let mut headers = http::HeaderMap::new();
        backend().authorize_request(&mut headers);
        assert_eq!(
            headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer sk-test"
        );
    }

    #[test]
    fn test_extract_text() {
        let payload = json!({
            "choices": [{"message": {"role": "assistant", "content": "hi there"}}]
        });
        assert_eq!(backend().extract_text(&payload).unwrap(), "hi there");
    }

    #[test]
    fn test_extract_text_empty_choices() {
        let err = backend().extract_text(&json!({"choices": []})).unwrap_err();
        assert!(err.to_string().contains("choices"));
    }
}
