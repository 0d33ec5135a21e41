//! Application-wide error types.

use thiserror::Error;

use crate::types::MoneyError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed structural validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input is well-formed but outside the allowed range (negative price, bad date).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The staff member lacks a permission or belongs to another shop.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Referenced record is unknown.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with current state (e.g. not enough stock).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code reported to callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller can fix the error by changing its input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Internal(_))
    }
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
