//! Unified error handling.
//!
//! Provides a unified `AppError` type for route handlers. All route handlers
//! should return `Result<T, AppError>`; the `IntoResponse` impl maps each
//! variant to a status code without leaking internal detail to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;
use crate::weather::WeatherError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Flat-file store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Weather API operation failed.
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    /// Session read/write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(err) => match err {
                StoreError::UnknownProduct(_) | StoreError::AbsentProduct(_) => {
                    StatusCode::NOT_FOUND
                }
                StoreError::Io(_) | StoreError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Weather(err) => match err {
                WeatherError::Unconfigured => StatusCode::SERVICE_UNAVAILABLE,
                WeatherError::Http(_) | WeatherError::Upstream(_) | WeatherError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(err) => match err {
                StoreError::UnknownProduct(_) | StoreError::AbsentProduct(_) => err.to_string(),
                StoreError::Io(_) | StoreError::Corrupt(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Weather(err) => match err {
                WeatherError::Unconfigured => "Weather widget is not configured".to_string(),
                _ => "Weather service unavailable".to_string(),
            },
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
