use safemap_core::ValidationError;
use thiserror::Error;

/// Errors returned by [`crate::DataStore::load`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not the expected collection shape.
    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// Short, stable label used in logs and error views.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "http_status",
            FetchError::Decode { .. } | FetchError::Validation(_) => "validation",
            FetchError::InvalidUrl { .. } => "configuration",
        }
    }
}

/// Errors from a [`crate::KvStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cache key '{0}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),
}
