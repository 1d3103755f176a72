//! Message sending and history endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use chatapp_core::service::chat::DEFAULT_HISTORY_LIMIT;
use chatapp_types::error::ChatError;
use chatapp_types::message::ChatMessage;

use crate::http::error::AppError;
use crate::http::extractors::json::JsonBody;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender: Option<String>,
    /// Omitted means broadcast.
    pub recipient: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageData {
    pub message_id: i64,
    pub recipient: String,
    pub sent_at: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user1: Option<String>,
    pub user2: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub messages: Vec<ChatMessage>,
}

/// POST /api/chat/send - Store a message from a logged-in sender.
pub async fn send_message(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SendMessageRequest>,
) -> Result<ApiResponse<SendMessageData>, AppError> {
    let (Some(sender), Some(content)) = (body.sender, body.message) else {
        return Err(ChatError::MissingFields.into());
    };

    let stored = state
        .chat_service
        .send_message(&sender, body.recipient.as_deref(), &content)
        .await?;

    Ok(ApiResponse::success(
        "Message sent successfully",
        SendMessageData {
            message_id: stored.id,
            recipient: stored.recipient,
            sent_at: stored.sent_at.to_rfc3339(),
        },
    ))
}

/// GET /api/chat/history?user1=&user2=&limit= - Conversation between two users.
pub async fn conversation_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<ApiResponse<HistoryData>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let (Some(user1), Some(user2)) = (query.user1, query.user2) else {
        return Err(AppError::Validation(
            "user1 and user2 are required".to_string(),
        ));
    };

    let messages = state
        .chat_service
        .conversation_history(&user1, &user2, query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await
        .map_err(|_| AppError::Internal("Failed to load conversation history".to_string()))?;

    Ok(ApiResponse::success(
        format!("{} message(s)", messages.len()),
        HistoryData { messages },
    ))
}

/// GET /api/chat/broadcasts?limit= - Recent broadcast messages.
pub async fn broadcast_history(
    State(state): State<AppState>,
    query: Result<Query<BroadcastQuery>, QueryRejection>,
) -> Result<ApiResponse<HistoryData>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let messages = state
        .chat_service
        .broadcast_history(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await
        .map_err(|_| AppError::Internal("Failed to load broadcast history".to_string()))?;

    Ok(ApiResponse::success(
        format!("{} message(s)", messages.len()),
        HistoryData { messages },
    ))
}
