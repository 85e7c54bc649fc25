//! Error types for the pinger service

use std::time::Duration;

/// Errors that can occur in the pinger service
#[derive(Debug, thiserror::Error)]
pub enum PingerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Http(String),

    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("HTTP {status} {reason}, body: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pinger operations
pub type Result<T> = std::result::Result<T, PingerError>;
