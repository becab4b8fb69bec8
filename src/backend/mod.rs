pub mod hosted;
pub mod ollama;

pub use hosted::{Hosted, HostedConfig};
pub use ollama::{Ollama, OllamaConfig};

use crate::relay::RelayError;

/// Backend trait for LLM inference backends.
pub trait Backend: Send + Sync {
    /// Human-readable name for this backend.
    fn name(&self) -> &str;

    /// Base URL for API requests.
    fn base_url(&self) -> &str;

    /// Path of the generate-completion endpoint, joined onto the base URL.
    fn generate_path(&self) -> &str;

    /// Add authentication to an outgoing request.
    fn authorize_request(&self, headers: &mut http::HeaderMap);

    /// Build the request body for a prompt, per this backend's schema.
    fn request_body(&self, prompt: &str) -> serde_json::Value;

    /// Extract the completion text from a response payload.
    fn extract_text(&self, body: &serde_json::Value) -> Result<String, RelayError>;
}
