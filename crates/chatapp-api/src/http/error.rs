//! Application error type mapping to HTTP status codes and the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatapp_types::error::{AuthError, ChatError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Registration/login errors.
    Auth(AuthError),
    /// Message send/history errors.
    Chat(ChatError),
    /// Malformed or incomplete request.
    Validation(String),
    /// Generic internal error; the message is sent to the client as-is.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Auth(AuthError::MissingCredentials) => (
                StatusCode::BAD_REQUEST,
                "Username and password are required".to_string(),
            ),
            AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AppError::Auth(AuthError::UsernameTaken(_)) => (
                StatusCode::CONFLICT,
                "Registration failed: username already taken".to_string(),
            ),
            AppError::Auth(AuthError::InvalidUsername(reason)) => (
                StatusCode::BAD_REQUEST,
                format!("Registration failed: {reason}"),
            ),
            AppError::Auth(AuthError::Hashing(_) | AuthError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::Chat(ChatError::MissingFields) => (
                StatusCode::BAD_REQUEST,
                "Sender and message content are required".to_string(),
            ),
            AppError::Chat(ChatError::NotLoggedIn(_)) => (
                StatusCode::UNAUTHORIZED,
                "Sender is not logged in".to_string(),
            ),
            AppError::Chat(ChatError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "request failed");
        }
        ApiResponse::failure(status, message).into_response()
    }
}
