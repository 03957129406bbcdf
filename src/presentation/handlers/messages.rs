use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::SessionId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::responses::{ConversationResponse, chat_error_response};

#[derive(Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn post_message_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let session_id = SessionId::from_uuid(session_id);
    tracing::debug!(content = %sanitize_prompt(&request.content), "Handling user message");

    match state
        .chat_service
        .handle_message(session_id, &request.content)
        .await
    {
        Ok(messages) => (
            StatusCode::OK,
            Json(ConversationResponse::new(session_id, messages)),
        )
            .into_response(),
        Err(e) => chat_error_response(e),
    }
}
