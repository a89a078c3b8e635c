//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Server-side failures are captured to
//! Sentry and logged before a generic message goes back to the client; client
//! mistakes are reported verbatim with a 4xx status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_core::IntakeError;
use thiserror::Error;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body was refused by the intake policy.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Intake(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Intake(IntakeError::MalformedJson(e)) => format!("Bad request: {e}"),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use roster_core::{IntakePolicy, UserRecordError, admit};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/missing.css".to_string());
        assert_eq!(err.to_string(), "Not found: /missing.css");

        let err = AppError::Intake(IntakeError::Invalid(UserRecordError::MissingField(
            "email",
        )));
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        let Err(malformed) = admit(b"not json", IntakePolicy::Permissive) else {
            panic!("non-JSON body must be refused");
        };

        assert_eq!(get_status(AppError::from(malformed)), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Intake(IntakeError::Invalid(
                UserRecordError::NotAnObject
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
