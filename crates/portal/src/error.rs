//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Most handlers render backend failures inline in
//! the page; `AppError` covers the cases that end the request instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Restaurant backend operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Employee is not authenticated or lacks the role for the action.
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
        // Capture server-side failures to Sentry
        if matches!(
            self,
            Self::Internal(_) | Self::Backend(BackendError::Http(_) | BackendError::Parse(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(err) => match err {
                BackendError::MissingIdentifier(_) => StatusCode::BAD_REQUEST,
                BackendError::OrderNotFound => StatusCode::NOT_FOUND,
                BackendError::WorkflowInProgress | BackendError::AlreadyProcessed => {
                    StatusCode::CONFLICT
                }
                BackendError::Connection(_)
                | BackendError::Http(_)
                | BackendError::Api { .. }
                | BackendError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Backend messages are user-facing by contract; internal details are not
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_owned(),
            Self::Backend(BackendError::Http(_) | BackendError::Parse(_)) => {
                "Error del servicio externo".to_owned()
            }
            Self::Backend(err) => err.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("pedido-123".to_owned());
        assert_eq!(err.to_string(), "Not found: pedido-123");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_error_status_codes() {
        assert_eq!(
            get_status(BackendError::OrderNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(BackendError::WorkflowInProgress.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(BackendError::MissingIdentifier("uuid").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(
                BackendError::Api {
                    status: 500,
                    message: "boom".to_owned()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }
}
