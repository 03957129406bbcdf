use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::responses::{ConversationResponse, chat_error_response};

#[tracing::instrument(skip(state))]
pub async fn create_session_handler<F, L>(State(state): State<AppState<F, L>>) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    match state.chat_service.start_session().await {
        Ok((session_id, messages)) => (
            StatusCode::CREATED,
            Json(ConversationResponse::new(session_id, messages)),
        )
            .into_response(),
        Err(e) => chat_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    match state
        .chat_service
        .end_session(SessionId::from_uuid(session_id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => chat_error_response(e),
    }
}
