use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Raised when a fetched payload does not match the schema of its dataset.
///
/// Validation fails closed: one malformed record rejects the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected a JSON array of {dataset}, got {found}")]
    NotACollection {
        dataset: &'static str,
        found: &'static str,
    },

    #[error("{dataset}[{index}]: {reason}")]
    InvalidRecord {
        dataset: &'static str,
        index: usize,
        reason: String,
    },
}
