use std::sync::Arc;

use crate::application::ports::{
    FileLoader, FileLoaderError, LlmClient, SessionRepository, SessionRepositoryError,
};
use crate::domain::{
    AssistantMessage, Session, SessionId, SelectionError, available_actions, parse_selection,
};

use super::analysis_service::{AnalysisError, AnalysisService, estimate_processing_time};
use super::document_service::{DocumentError, DocumentService, UploadedFile};

const WELCOME: &str = "Welcome to the MCP Document Processing Agent! 📄\n\nPlease upload a document (PDF, DOCX, or TXT) and select the actions you'd like to perform on it.";

const HELP: &str = "**📋 MCP Document Processing Agent - Help**

**Supported File Types:**
- PDF (.pdf)
- Word Documents (.docx)
- Text Files (.txt)

**How to Use:**
1. Upload a document using the file upload button
2. Select actions by typing numbers (e.g., '1,2,3' or 'all')
3. Type 'process' to execute the selected actions

**Available Commands:**
- `help` - Show this help message
- `actions` - Show available actions
- `process` - Process document with selected actions
- `all` - Select all available actions

**Tips:**
- You can select multiple actions at once
- Large documents may take longer to process
- Make sure your API keys are properly configured";

const UPLOAD_FIRST: &str = "Please upload a document first, or type 'help' for assistance.";
const PROCESSING_COMPLETE: &str = "✨ Processing complete! You can upload another document or select different actions for the current document.";

/// A text command typed into the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Actions,
    Process,
    Select(String),
}

impl ChatCommand {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "help" | "/help" => Self::Help,
            "actions" | "/actions" => Self::Actions,
            "process" => Self::Process,
            _ => Self::Select(trimmed.to_string()),
        }
    }
}

/// Drives one conversation per session: upload, select, process.
pub struct ChatService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    document_service: Arc<DocumentService<F>>,
    analysis_service: Arc<AnalysisService<L>>,
    session_repository: Arc<dyn SessionRepository>,
}

impl<F, L> ChatService<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient + ?Sized,
{
    pub fn new(
        document_service: Arc<DocumentService<F>>,
        analysis_service: Arc<AnalysisService<L>>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            document_service,
            analysis_service,
            session_repository,
        }
    }

    pub async fn start_session(&self) -> Result<(SessionId, Vec<AssistantMessage>), ChatError> {
        let session = Session::new();
        self.session_repository.create(&session).await?;
        tracing::info!(session_id = %session.id, "Session started");
        Ok((session.id, vec![AssistantMessage::new(WELCOME)]))
    }

    /// Cancels any in-flight generation and drops the session.
    pub async fn end_session(&self, session_id: SessionId) -> Result<(), ChatError> {
        let session = self
            .session_repository
            .remove(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound(session_id))?;
        session.cancellation.cancel();
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }

    #[tracing::instrument(skip(self, upload), fields(session_id = %session_id, filename = %upload.name))]
    pub async fn upload(
        &self,
        session_id: SessionId,
        upload: UploadedFile,
    ) -> Result<Vec<AssistantMessage>, ChatError> {
        let mut session = self.session(session_id).await?;
        let filename = upload.name.clone();

        if !DocumentService::<F>::is_supported_file(&filename) {
            tracing::warn!("Unsupported file type");
            return Ok(vec![AssistantMessage::new(format!(
                "❌ Unsupported file type. Please upload PDF, DOCX, or TXT files only.\n\nReceived: {filename}"
            ))]);
        }

        let load = match self.document_service.load(upload).await {
            Ok(load) => load,
            Err(e) => {
                tracing::warn!(error = %e, "Document rejected");
                return Ok(vec![AssistantMessage::new(document_error_message(
                    &filename, &e,
                ))]);
            }
        };

        let display_name = load.document.document.display_name();
        let stats = load.validation.stats;
        session.replace_document(load.document);
        self.session_repository.save(&session).await?;

        let mut summary = format!(
            "✅ Document processed successfully: {display_name}\n\n📊 **Document Stats:**\n- Characters: {}\n- Words: {}\n",
            format_thousands(stats.character_count),
            format_thousands(stats.word_count),
        );
        for warning in &load.validation.warnings {
            summary.push_str(&format!("\n⚠️ {warning}\n"));
        }
        summary.push_str("\nNow please select the actions you'd like to perform:");

        Ok(vec![
            AssistantMessage::new(summary),
            AssistantMessage::new(action_list()),
        ])
    }

    #[tracing::instrument(skip(self, input), fields(session_id = %session_id))]
    pub async fn handle_message(
        &self,
        session_id: SessionId,
        input: &str,
    ) -> Result<Vec<AssistantMessage>, ChatError> {
        let session = self.session(session_id).await?;

        match ChatCommand::parse(input) {
            ChatCommand::Help => Ok(vec![AssistantMessage::new(HELP)]),
            ChatCommand::Actions => Ok(vec![AssistantMessage::new(action_list())]),
            ChatCommand::Process => Ok(self.process(session).await),
            ChatCommand::Select(text) if session.document.is_some() => {
                self.select(session, &text).await
            }
            ChatCommand::Select(_) => Ok(vec![AssistantMessage::new(UPLOAD_FIRST)]),
        }
    }

    async fn select(
        &self,
        mut session: Session,
        input: &str,
    ) -> Result<Vec<AssistantMessage>, ChatError> {
        let Some(document_id) = session.document.as_ref().map(|d| d.document.id) else {
            return Ok(vec![AssistantMessage::new(UPLOAD_FIRST)]);
        };

        let selection = match parse_selection(input, document_id) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::debug!(error = %e, "Selection rejected");
                return Ok(vec![AssistantMessage::new(selection_error_message(&e))]);
            }
        };

        let everything = selection.is_all();
        let names = selection.action_names().join(", ");
        session.select(selection);
        self.session_repository.save(&session).await?;

        let reply = if everything {
            "✅ All actions selected! Type 'process' to execute.".to_string()
        } else {
            format!("✅ Selected actions: {names}\n\nType 'process' to execute these actions.")
        };

        Ok(vec![AssistantMessage::new(reply)])
    }

    async fn process(&self, session: Session) -> Vec<AssistantMessage> {
        let Some(document) = session.document.as_ref() else {
            return vec![AssistantMessage::new(
                "❌ No document uploaded. Please upload a document first.",
            )];
        };

        if session.selection.is_empty() {
            return vec![AssistantMessage::new(
                "❌ No actions selected. Please select actions first.",
            )];
        }

        let display_name = document.document.display_name();
        let estimate = estimate_processing_time(
            document.content.stats().character_count,
            session.selection.len(),
        );
        tracing::info!(
            document = %display_name,
            actions = session.selection.len(),
            estimate = %estimate,
            "Processing document"
        );

        let mut messages = vec![AssistantMessage::new(format!(
            "🔄 Processing document '{display_name}' with selected actions... (estimated {estimate})"
        ))];

        match self
            .analysis_service
            .analyze(document, &session.selection, &session.cancellation)
            .await
        {
            Ok(report) => {
                messages.push(AssistantMessage::new(report.render()));
                messages.push(AssistantMessage::new(PROCESSING_COMPLETE));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Processing failed");
                messages.push(AssistantMessage::new(analysis_error_message(&e)));
            }
        }

        messages
    }

    async fn session(&self, session_id: SessionId) -> Result<Session, ChatError> {
        self.session_repository
            .get(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound(session_id))
    }
}

/// Numbered catalog listing with usage hints.
pub fn action_list() -> String {
    let mut text = String::from("**Available Actions:**\n\n");
    for (i, action) in available_actions().iter().enumerate() {
        text.push_str(&format!(
            "{}. **{}** - {}\n",
            i + 1,
            action.name,
            action.description
        ));
    }
    text.push_str("\n📝 **How to proceed:**\n");
    text.push_str("Type the numbers of actions you want (e.g., '1,3,5') or 'all' for all actions, then type 'process' to execute.\n\n");
    text.push_str("Example: `1,2,4` then `process`");
    text
}

fn document_error_message(filename: &str, error: &DocumentError) -> String {
    match error {
        DocumentError::UnsupportedFileType(_) => format!(
            "❌ Unsupported file type. Please upload PDF, DOCX, or TXT files only.\n\nReceived: {filename}"
        ),
        DocumentError::Extraction(FileLoaderError::NoTextFound(_)) => format!(
            "❌ Failed to extract content from {filename}. Please check if the file is valid and not corrupted."
        ),
        DocumentError::Validation(validation) => format!(
            "❌ Document validation failed for {filename}:\n- {}",
            validation.issues.join("\n- ")
        ),
        other => format!(
            "❌ Error processing document: {other}\n\nPlease try uploading the file again or contact support if the issue persists."
        ),
    }
}

fn selection_error_message(error: &SelectionError) -> &'static str {
    match error {
        SelectionError::NoValidActions => {
            "❌ Invalid action numbers. Please select valid action numbers."
        }
        SelectionError::InvalidFormat(_) => {
            "❌ Invalid input format. Please use comma-separated numbers (e.g., '1,2,3') or 'all'."
        }
        SelectionError::Unrecognized => {
            "I didn't understand that. Please select actions by typing numbers (e.g., '1,2,3'), 'all', or 'process' to execute."
        }
    }
}

fn analysis_error_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::NoActionsSelected | AnalysisError::StaleSelection => {
            "❌ No actions selected. Please select actions first.".to_string()
        }
        AnalysisError::EmptyResponse => "❌ Failed to process document with AI. Please check your API configuration and try again.".to_string(),
        AnalysisError::Cancelled => "⚠️ Processing was cancelled.".to_string(),
        AnalysisError::Generation(e) => format!(
            "❌ Error during processing: {e}\n\nPlease try again or contact support if the issue persists."
        ),
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("session storage: {0}")]
    Repository(SessionRepositoryError),
}

impl From<SessionRepositoryError> for ChatError {
    fn from(error: SessionRepositoryError) -> Self {
        match error {
            SessionRepositoryError::NotFound(id) => Self::SessionNotFound(id),
            other => Self::Repository(other),
        }
    }
}
