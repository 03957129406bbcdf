use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ChatError;
use crate::domain::{AssistantMessage, SessionId};

#[derive(Serialize)]
pub struct MessageBody {
    pub content: String,
}

/// Assistant replies for one session, in the order they were produced.
#[derive(Serialize)]
pub struct ConversationResponse {
    pub session_id: String,
    pub messages: Vec<MessageBody>,
}

impl ConversationResponse {
    pub fn new(session_id: SessionId, messages: Vec<AssistantMessage>) -> Self {
        Self {
            session_id: session_id.to_string(),
            messages: messages
                .into_iter()
                .map(|m| MessageBody { content: m.content })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

pub fn chat_error_response(error: ChatError) -> Response {
    match error {
        ChatError::SessionNotFound(id) => {
            tracing::warn!(session_id = %id, "Unknown session");
            error_response(StatusCode::NOT_FOUND, format!("Session not found: {id}"))
        }
        other => {
            tracing::error!(error = %other, "Session storage failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
