//! Web error types for the Pageforge web server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::generator::GeneratorError;
use crate::identity::IdentityError;
use crate::store::StoreError;

/// Error type for web API operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request with validation error.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict (e.g., account already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An upstream provider failed the request.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A backing service is unreachable or not configured.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg.clone())),
            WebError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad Request", Some(msg.clone()))
            }
            WebError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", Some(msg.clone()))
            }
            WebError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(msg.clone())),
            WebError::Upstream(msg) => {
                tracing::error!("Upstream provider error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Upstream Error", Some(msg.clone()))
            }
            WebError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                Some(msg.clone()),
            ),
            WebError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        WebError::Internal(err.to_string())
    }
}

impl From<IdentityError> for WebError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials
            | IdentityError::UserNotFound
            | IdentityError::WrongPassword => {
                WebError::Unauthorized("Invalid email or password".to_string())
            }
            IdentityError::WeakPassword => {
                WebError::BadRequest("Password should be at least 6 characters".to_string())
            }
            IdentityError::EmailInUse => {
                WebError::Conflict("An account with this email already exists".to_string())
            }
            IdentityError::ConfigurationMissing | IdentityError::OperationNotAllowed => {
                WebError::Unavailable("Identity service not configured".to_string())
            }
            IdentityError::Network(msg) => WebError::Unavailable(msg),
            IdentityError::Unexpected(msg) => WebError::Internal(msg),
        }
    }
}

impl From<GeneratorError> for WebError {
    fn from(err: GeneratorError) -> Self {
        WebError::Upstream(err.to_string())
    }
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => WebError::NotFound("Page not found".to_string()),
            StoreError::PermissionDenied => {
                WebError::Unauthorized("Access to this page was denied".to_string())
            }
            StoreError::Unavailable(msg) => WebError::Unavailable(msg),
            StoreError::Other(msg) => WebError::Internal(msg),
        }
    }
}
