//! Client errors.

use thiserror::Error;

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the analysis backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration problem (missing or malformed environment values).
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("request timeout after {timeout_ms}ms")]
    Timeout {
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// The backend answered with a non-success status.
    #[error("backend error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The payload decoded but violated the model invariants, or did not
    /// decode at all.
    #[error("invalid analysis payload: {0}")]
    Model(#[from] bando_model::ModelError),

    /// All retries exhausted.
    #[error("backend unavailable: {message} (retries: {retries})")]
    Unavailable {
        /// Last error observed.
        message: String,
        /// Number of retries performed.
        retries: u32,
    },
}

impl ClientError {
    /// Whether a retry can plausibly help: transport failures, timeouts
    /// and server-side errors. Client-side errors (4xx, invalid payloads,
    /// bad configuration) fail fast.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Config { .. } | Self::Model(_) | Self::Unavailable { .. } => false,
        }
    }
}
