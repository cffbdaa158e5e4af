use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The completion backend has no credential. This is a supported steady
    /// state, not a fault: callers short-circuit to the heuristic path.
    #[error("Completion backend is not configured")]
    NotConfigured,

    /// Represents transport-level failures (connect, TLS, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-2xx response from the completion service. Carries the status and
    /// raw body text so the parameter-negotiation matrix can classify it.
    #[error("Completion API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The completion response contained no extractable message text.
    /// The payload is a bounded diagnostic of the response shape, never the
    /// full content.
    #[error("Empty completion: {0}")]
    EmptyCompletion(String),

    /// The model's reply violated the output contract (invalid JSON or a
    /// shape the normalizer cannot coerce).
    #[error("Output contract violation: {0}")]
    Contract(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Contract(format!("JSON error: {}", err))
    }
}

impl AppError {
    /// Status and body of an API rejection, when this error is one.
    pub fn api_rejection(&self) -> Option<(u16, &str)> {
        match self {
            AppError::Api { status, body } => Some((*status, body.as_str())),
            _ => None,
        }
    }
}
