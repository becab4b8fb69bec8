use clap::Parser;

/// prompt-relay — forwards a submitted prompt to an inference endpoint.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Listen address (e.g. ":5000" or "0.0.0.0:5000")
    #[arg(long, default_value = ":5000", env = "ADDR")]
    pub addr: String,

    /// Log format: "text" or "json"
    #[arg(long, default_value = "text", env = "LOG_FORMAT")]
    pub log_format: String,

    /// Inference backend: "ollama" or "hosted"
    #[arg(long, default_value = "ollama", env = "BACKEND")]
    pub backend: String,

    /// Ollama daemon base URL
    #[arg(long, default_value = "http://localhost:11434", env = "OLLAMA_HOST")]
    pub ollama_host: String,

    /// Model identifier sent with every generate request
    #[arg(long, default_value = "qwen3", env = "OLLAMA_MODEL")]
    pub model: String,

    /// Hosted API base URL
    #[arg(long, default_value = "https://api.openai.com", env = "HOSTED_BASE_URL")]
    pub hosted_base_url: String,

    /// Hosted API bearer credential
    #[arg(long, env = "HOSTED_API_KEY")]
    pub hosted_api_key: Option<String>,
}

/// Convert Go-style ":5000" to "0.0.0.0:5000".
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_addr_prepends_wildcard() {
        assert_eq!(normalize_addr(":5000"), "0.0.0.0:5000");
    }

    #[test]
    fn test_normalize_addr_passes_through_full_addr() {
        assert_eq!(normalize_addr("127.0.0.1:8080"), "127.0.0.1:8080");
    }
}
