use thiserror::Error;

/// Client-level error type shared by the API client, the session manager,
/// and both AI backends.
///
/// Propagation policy: `Api` carries the server-provided `detail` message
/// when one exists, otherwise a generic HTTP-status message. The session
/// manager converts these into `AuthOutcome` at the login/register boundary
/// so callers render errors inline instead of handling exceptions.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("AI backend returned empty content")]
    EmptyContent,
}

impl ClientError {
    /// Whether this error is an HTTP response with the given status code.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == code)
    }
}
