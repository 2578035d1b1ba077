//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! It centralizes error logging and HTTP response generation, so handlers and
//! services can simply propagate [`AppError`] with `?`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Central application error type that encompasses all possible error conditions.
///
/// Each variant maps onto exactly one HTTP status. _Db errors are logged
/// automatically, while other errors should be logged at the point of creation if needed._
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Email failed the format or MX check. Carries the check message.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("email {0} already exists")]
    DuplicateEmail(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Db(e) = &self {
            // Log detailed database errors for internal tracking
            error!(?e, "Database error occurred");
        }

        let (status, message) = match self {
            AppError::Db(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidEmail(msg) => (StatusCode::NOT_ACCEPTABLE, msg),
            AppError::DuplicateEmail(email) => (
                StatusCode::BAD_REQUEST,
                format!("Email {email} already exists"),
            ),
        };

        let body = Json(ErrorBody { message });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
