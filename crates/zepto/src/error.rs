//! Error types for routing and handlers.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the request.
    #[error("no route matched: {method} {path}")]
    NotFound { method: String, path: String },

    /// Two patterns disagree on the parameter name bound at the same depth.
    #[error("parameter `:{conflicting}` in {pattern} conflicts with existing `:{existing}`")]
    ParamConflict {
        pattern: String,
        existing: String,
        conflicting: String,
    },

    /// The same parameter name appears more than once in one pattern.
    #[error("parameter `:{name}` appears more than once in {pattern}")]
    DuplicateParam { pattern: String, name: String },

    /// Invalid path pattern.
    #[error("invalid path pattern: {0}")]
    InvalidPattern(String),

    /// A handler failed after its route matched.
    #[error("handler failed: {0}")]
    Handler(#[from] HandlerError),
}

/// Failure signalled by a handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Free-form failure message.
    #[error("{0}")]
    Message(String),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error raised by application code.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates a failure from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
