//! Mapping of domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::ledger::LedgerError;
use crate::validation::ValidationError;

/// Error returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("not found")]
    RouteNotFound,

    #[error("internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            // the engine turns insufficient funds into an outcome; reaching
            // here means an invariant broke
            ApiError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine readable error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => match e {
                ValidationError::InvalidUserId(_) => "invalid_user_id",
                ValidationError::InvalidSourceType => "invalid_source_type",
                ValidationError::MalformedBody(_) => "malformed_body",
                ValidationError::MissingField(_) => "missing_field",
                ValidationError::InvalidState(_) => "invalid_state",
                ValidationError::InvalidAmount(_) => "invalid_amount",
                ValidationError::UserNotFound(_) => "user_not_found",
            },
            ApiError::Ledger(LedgerError::UserNotFound(_)) => "user_not_found",
            ApiError::Ledger(_) | ApiError::Internal => "internal_error",
            ApiError::RouteNotFound => "not_found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // internal details stay in the logs
        let message = if status.is_server_error() {
            error!(reason = %self, "request failed");
            "internal server error".to_string()
        } else {
            debug!(reason = %self, status = status.as_u16(), "request rejected");
            self.to_string()
        };

        let body = ErrorBody {
            error: message,
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}
