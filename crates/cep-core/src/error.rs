use thiserror::Error;

/// Application-wide error types for the CEP tracker.
#[derive(Error, Debug)]
pub enum AppError {
    /// The lookup service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// HTTP request failed before a status was available, or the body could not be read.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The result table could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Upstream HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
