use crate::catalog::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub enum AppError {
    // Catalog errors
    Validation(ValidationError),
    UnknownEntity(String),

    // Input errors
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidPayload(String),

    // Configuration errors
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::UnknownEntity(name) => write!(f, "Unknown entity: {}", name),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Json(e) => write!(f, "Malformed JSON: {}", e),
            AppError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

// Convert from various error types
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

// Implement IntoResponse for Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "entity": e.entity,
                    "violations": e.violations,
                    "status": StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                }),
            ),
            AppError::UnknownEntity(_) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": self.to_string(),
                    "status": StatusCode::NOT_FOUND.as_u16(),
                }),
            ),
            AppError::Json(_) | AppError::InvalidPayload(_) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.to_string(),
                    "status": StatusCode::BAD_REQUEST.as_u16(),
                }),
            ),
            AppError::Io(_) | AppError::Configuration(_) => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
