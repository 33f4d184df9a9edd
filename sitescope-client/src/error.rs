use thiserror::Error;

/// Errors produced while issuing or decoding the expanded site query.
///
/// The taxonomy is deliberate: transport faults, non-success statuses, and
/// wrong-shaped bodies are distinct conditions so the caller can present
/// each one instead of hanging on a loading indicator.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
