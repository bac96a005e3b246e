// Error types for folio.
// Covers GitHub/WordPress HTTP failures, cache and output I/O, and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP client error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No repositories found for {0}")]
    NoRepositories(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl FolioError {
    /// True for status-level failures that mean "the thing is not there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, FolioError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
