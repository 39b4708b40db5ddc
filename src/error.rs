// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every failure is rendered as the standard envelope
//! `{status, message, error, data}` where `error` is the canonical reason
//! phrase for the status code.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    /// Uniqueness violation. Reported as 400 for client compatibility.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transport API error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const INVALID_LOGIN: &'static str = "invalid login credentials";
    pub const EMAIL_TAKEN: &'static str = "sorry, email is taken";
    pub const NOT_AUTHORIZED: &'static str = "sorry, you're not authorized for this request";
    const GENERIC_FAILURE: &'static str = "something went wrong, please try again later";

    /// Build a validation error from `validator` output.
    ///
    /// Field messages are sorted so responses are stable across runs.
    pub fn validation(message: &str, errors: &validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|err| match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("{} is invalid", field),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        details.sort();

        AppError::Validation {
            message: message.to_string(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) | AppError::InvalidToken | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    message: String,
    error: &'static str,
    data: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, data) = match self {
            AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => (msg, None),
            AppError::InvalidToken => ("invalid or expired token".to_string(), None),
            AppError::InvalidCredentials => (Self::INVALID_LOGIN.to_string(), None),
            AppError::Validation { message, details } => (message, Some(details)),
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Transport API error");
                ("failed to reach the journey planner".to_string(), None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (Self::GENERIC_FAILURE.to_string(), None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (Self::GENERIC_FAILURE.to_string(), None)
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Error"),
            data,
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
