use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::UploadedFile;
use crate::domain::SessionId;
use crate::presentation::state::AppState;

use super::responses::{ConversationResponse, chat_error_response, error_response};

const FILE_FIELD: &str = "file";

/// Accepts one multipart `file` field and hands it to the session.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let session_id = SessionId::from_uuid(session_id);

    let upload = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file field");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        match field.bytes().await {
            Ok(data) => {
                tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
                break UploadedFile::inline(filename, data.to_vec());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read file: {}", e),
                );
            }
        }
    };

    match state.chat_service.upload(session_id, upload).await {
        Ok(messages) => (
            StatusCode::OK,
            Json(ConversationResponse::new(session_id, messages)),
        )
            .into_response(),
        Err(e) => chat_error_response(e),
    }
}
