//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use myflix_shared::{AuthError, ErrorDetail, ErrorResponse, FieldError};
use thiserror::Error;
use tracing::{debug, error};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Body is not JSON, or not sent as JSON
    #[error("Malformed request body: {1}")]
    MalformedBody(StatusCode, String),

    #[error("Authentication failed: {0}")]
    Unauthorized(#[from] AuthError),

    /// Caller is authenticated but is not the account owner
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
            ),
            ApiError::MalformedBody(status, msg) => (*status, "MALFORMED_BODY", msg.clone()),
            ApiError::Unauthorized(reason) => {
                debug!(%reason, "Rejecting unauthenticated request");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    reason.public_message().to_string(),
                )
            }
            ApiError::PermissionDenied => (
                StatusCode::BAD_REQUEST,
                "PERMISSION_DENIED",
                "Permission denied.".to_string(),
            ),
            ApiError::AlreadyExists(msg) => {
                (StatusCode::BAD_REQUEST, "ALREADY_EXISTS", msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let details = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape is a field failure
            JsonRejection::JsonDataError(err) => {
                let detail = err.body_text();
                ApiError::Validation(vec![field_error_from_serde(&detail)])
            }
            other => ApiError::MalformedBody(other.status(), other.body_text()),
        }
    }
}

const DESERIALIZE_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Turn a serde error message into a field error naming the offending key
///
/// Messages look like `Username: invalid type: ...` or
/// ``missing field `Password` at line 1 column 24``. Anything else is
/// attributed to `body`.
fn field_error_from_serde(detail: &str) -> FieldError {
    let detail = detail.strip_prefix(DESERIALIZE_PREFIX).unwrap_or(detail);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return FieldError::new(field, format!("{} is required", field));
        }
    }

    match detail.split_once(": ") {
        Some((field, message))
            if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            FieldError::new(field, message)
        }
        _ => FieldError::new("body", detail),
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
