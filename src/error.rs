//! Error types for the payoff engine.

use serde::Serialize;


/// Serializable error body for a presentation layer.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

/// Payoff engine error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayoffError {
    /// Non-numeric or otherwise unusable strike, premium or range value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Expiration text that is not a `YYYY-MM-DD` date.
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    /// Strategy name with no entry in the catalogue.
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

impl PayoffError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PayoffError::InvalidParameter(_) => "INVALID_PARAMETER",
            PayoffError::InvalidDateFormat(_) => "INVALID_DATE_FORMAT",
            PayoffError::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
        }
    }
}

impl From<&PayoffError> for ErrorResponse {
    fn from(err: &PayoffError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

impl From<PayoffError> for ErrorResponse {
    fn from(err: PayoffError) -> Self {
        ErrorResponse::from(&err)
    }
}

/// Result alias used throughout the crate.
pub type PayoffResult<T> = Result<T, PayoffError>;
