use thiserror::Error;

/// Top-level error type for Delivre.
#[derive(Debug, Error)]
pub enum DelivreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Storage error.
    #[error("store error: {0}")]
    Store(String),

    /// Submitted form data was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sign-in or session failure.
    #[error("auth error: {0}")]
    Auth(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}
