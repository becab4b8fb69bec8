use thiserror::Error;

/// Upstream call failures. All variants are surfaced to the caller as
/// readable text, unmodified.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream request failed: {0}")]
    Request(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),
}
