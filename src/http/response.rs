//! Error responses.
//!
//! # Responsibilities
//! - Map every failure of the filtered endpoint to an HTTP status
//! - Render failures as `{ "error": "..." }` JSON
//! - Turn handler panics into 500 responses
//!
//! # Design Decisions
//! - Upstream HTTP failures keep the upstream status and message
//! - Transport failures never leak details to callers

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filtering::FilterError;
use crate::upstream::UpstreamError;

const INTERNAL_ERROR: &str = "Internal Server Error";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures of the filtered responses endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing Authorization header.")]
    MissingCredential,

    #[error("Please provide a form id.")]
    MissingFormId,

    #[error("Filters must be an array.")]
    FiltersNotArray,

    #[error("Please provide atleast 1 filter.")]
    NoFilters,

    #[error("Invalid filter at index {index}: {reason}")]
    InvalidClause { index: usize, reason: String },

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Not Found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential => StatusCode::FORBIDDEN,
            ApiError::MissingFormId
            | ApiError::FiltersNotArray
            | ApiError::NoFilters
            | ApiError::InvalidClause { .. }
            | ApiError::Filter(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Status { status, .. }) => *status,
            ApiError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream(UpstreamError::Status { .. } | UpstreamError::Timeout(_)) => {
                self.to_string()
            }
            ApiError::Upstream(_) => INTERNAL_ERROR.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.message())
    }
}

/// JSON error response with an arbitrary status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Panic handler for `CatchPanicLayer`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(ApiError::MissingCredential.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::MissingFormId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::FiltersNotArray.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFilters.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoFilters.message(), "Please provide atleast 1 filter.");
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let err = ApiError::from(UpstreamError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Form not found".into(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Form not found");
    }

    #[test]
    fn upstream_internals_are_hidden() {
        let err = ApiError::from(UpstreamError::MalformedPayload("responses missing".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal Server Error");

        let timeout = ApiError::from(UpstreamError::Timeout(30));
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn panic_becomes_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
