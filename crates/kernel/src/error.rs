//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::form::Envelope;

/// Application errors raised outside the form protocol (pages, sessions).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };

        if let AppError::Internal(e) = &self {
            tracing::error!(error = %e, "internal server error");
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

/// A rejected form request.
///
/// Every variant carries the full list of messages reported to the client,
/// so validation that finds several problems reports all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Malformed, missing or mismatched input (400).
    #[error("bad request: {}", .0.join(" "))]
    BadRequest(Vec<String>),

    /// A referenced entity does not exist (404).
    #[error("not found: {}", .0.join(" "))]
    NotFound(Vec<String>),
}

impl FormError {
    /// A bad request with a single message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(vec![message.into()])
    }

    /// A not-found error with a single message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(vec![message.into()])
    }

    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Messages reported to the client, in order.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::BadRequest(messages) | Self::NotFound(messages) => messages,
        }
    }

    /// Consume the error and return its messages.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::BadRequest(messages) | Self::NotFound(messages) => messages,
        }
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        Envelope::from(self).into_response()
    }
}
