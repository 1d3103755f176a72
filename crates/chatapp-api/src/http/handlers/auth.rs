//! Login, logout, and registration endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use chatapp_types::error::AuthError;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for login. Missing fields are reported by the handler.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterData {
    pub user_id: i64,
}

/// POST /api/auth/login - Verify credentials and open a session.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiResponse<LoginData>, AppError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AuthError::MissingCredentials.into());
    };

    let session = state
        .auth_service
        .authenticate(&username, &password)
        .await?;

    Ok(ApiResponse::success(
        "Login successful",
        LoginData {
            username: session.username,
        },
    ))
}

/// POST /api/auth/logout - End the user's session. Succeeds even if none was open.
pub async fn logout(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LogoutRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let username = body
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Username is required".to_string()))?;

    state.auth_service.logout(&username);

    Ok(ApiResponse::ok("Logged out successfully"))
}

/// POST /api/auth/register - Create a new account.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<ApiResponse<RegisterData>, AppError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AuthError::MissingCredentials.into());
    };

    let user = state
        .auth_service
        .register(&username, &password, body.email.as_deref())
        .await
        .map_err(|e| match e {
            AuthError::Storage(_) | AuthError::Hashing(_) => {
                AppError::Internal("Registration failed".to_string())
            }
            other => other.into(),
        })?;

    Ok(
        ApiResponse::success("Registration successful", RegisterData { user_id: user.id })
            .with_status(StatusCode::CREATED),
    )
}
