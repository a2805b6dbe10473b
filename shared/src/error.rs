//! Error types for the booking Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a booking request.
#[derive(Error, Debug)]
pub enum Error {
    /// Store (DynamoDB) error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("{0}")]
    Validation(String),

    /// Authentication error
    #[error("{0}")]
    Auth(String),

    /// Not found error
    #[error("{0}")]
    NotFound(String),

    /// Unsupported HTTP method (carries the offending method name)
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Auth(_) => 401,
            Error::NotFound(_) => 404,
            Error::MethodNotAllowed(_) => 405,
            _ => 500,
        }
    }
}

impl From<lambda_http::Error> for Error {
    fn from(err: lambda_http::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
