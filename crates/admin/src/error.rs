//! Unified error handling for the admin panel.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::game::GameApiError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Game backend API operation failed.
    #[error("Game API error: {0}")]
    GameApi(#[from] GameApiError),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::GameApi(_) | Self::Template(_) | Self::Session(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Template(_) | Self::Session(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::GameApi(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Template(_) | Self::Session(_) | Self::Internal(_) => {
                "Internal server error".to_owned()
            }
            Self::GameApi(_) => "Game backend error".to_owned(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("guild Ashborn".to_owned());
        assert_eq!(err.to_string(), "Not found: guild Ashborn");

        let err = AppError::BadRequest("invalid input".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_game_api_error_is_bad_gateway() {
        let err = AppError::GameApi(GameApiError::Api {
            status: 500,
            message: "boom".to_owned(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
