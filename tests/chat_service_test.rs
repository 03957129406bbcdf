use std::sync::Arc;

use lectern::application::ports::{FileLoader, FileLoaderError, LlmClient, LlmClientError};
use lectern::application::services::{
    AnalysisOptions, AnalysisService, ChatCommand, ChatError, ChatService, DocumentService,
    UploadedFile, action_list, format_thousands,
};
use lectern::domain::{Document, SessionId};
use lectern::infrastructure::persistence::InMemorySessionRepository;

const DOCUMENT_TEXT: &[u8] = b"QUARTERLY UPDATE\nRevenue grew by twelve percent this quarter.";

struct MockFileLoader;

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}

struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok("Mock analysis".to_string())
    }
}

fn chat_service() -> ChatService<MockFileLoader, MockLlmClient> {
    ChatService::new(
        Arc::new(DocumentService::new(Arc::new(MockFileLoader))),
        Arc::new(AnalysisService::new(
            Arc::new(MockLlmClient),
            AnalysisOptions::default(),
        )),
        Arc::new(InMemorySessionRepository::new()),
    )
}

async fn session_with_document(service: &ChatService<MockFileLoader, MockLlmClient>) -> SessionId {
    let (session_id, _) = service.start_session().await.unwrap();
    service
        .upload(
            session_id,
            UploadedFile::inline("notes.txt", DOCUMENT_TEXT.to_vec()),
        )
        .await
        .unwrap();
    session_id
}

async fn reply(
    service: &ChatService<MockFileLoader, MockLlmClient>,
    session_id: SessionId,
    input: &str,
) -> Vec<String> {
    service
        .handle_message(session_id, input)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect()
}

#[test]
fn given_chat_input_when_parsing_command_then_keywords_are_case_insensitive() {
    assert_eq!(ChatCommand::parse("  HELP "), ChatCommand::Help);
    assert_eq!(ChatCommand::parse("/help"), ChatCommand::Help);
    assert_eq!(ChatCommand::parse("/actions"), ChatCommand::Actions);
    assert_eq!(ChatCommand::parse("Process"), ChatCommand::Process);
    assert_eq!(
        ChatCommand::parse(" 1,2 "),
        ChatCommand::Select("1,2".to_string())
    );
}

#[test]
fn given_counts_when_formatting_then_thousands_separated() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1,000");
    assert_eq!(format_thousands(1_234_567), "1,234,567");
}

#[tokio::test]
async fn given_new_session_when_started_then_welcome_message() {
    let (_, messages) = chat_service().start_session().await.unwrap();

    assert_eq!(messages.len(), 1);
    assert!(messages[0]
        .content
        .starts_with("Welcome to the MCP Document Processing Agent! 📄"));
}

#[tokio::test]
async fn given_unknown_session_when_messaging_then_session_not_found() {
    let result = chat_service().handle_message(SessionId::new(), "help").await;

    assert!(matches!(result, Err(ChatError::SessionNotFound(_))));
}

#[tokio::test]
async fn given_no_document_when_selecting_then_asked_to_upload_first() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    let messages = reply(&service, session_id, "1,2").await;

    assert_eq!(
        messages,
        vec!["Please upload a document first, or type 'help' for assistance.".to_string()]
    );
}

#[tokio::test]
async fn given_help_and_actions_commands_when_messaging_then_reference_texts() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    let help = reply(&service, session_id, "help").await;
    let actions = reply(&service, session_id, "actions").await;

    assert!(help[0].starts_with("**📋 MCP Document Processing Agent - Help**"));
    assert_eq!(actions, vec![action_list()]);
    assert!(actions[0].contains("1. **Summarize Document** - Create a comprehensive summary of the document\n"));
    assert!(actions[0].ends_with("Example: `1,2,4` then `process`"));
}

#[tokio::test]
async fn given_unsupported_upload_when_uploading_then_error_message_names_file() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    let messages = service
        .upload(session_id, UploadedFile::inline("photo.png", vec![1, 2, 3]))
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert!(messages[0].content.starts_with("❌ Unsupported file type."));
    assert!(messages[0].content.ends_with("Received: photo.png"));
}

#[tokio::test]
async fn given_too_short_upload_when_uploading_then_validation_message() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    let messages = service
        .upload(session_id, UploadedFile::inline("tiny.txt", b"hi".to_vec()))
        .await
        .unwrap();

    assert_eq!(
        messages[0].content,
        "❌ Document validation failed for tiny.txt:\n- Document content is too short (less than 10 characters)"
    );
}

#[tokio::test]
async fn given_valid_upload_when_uploading_then_stats_and_action_list() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();
    let text = format!("{}word.", "word ".repeat(2_499));

    let messages = service
        .upload(
            session_id,
            UploadedFile::inline("notes.txt", text.into_bytes()),
        )
        .await
        .unwrap();

    assert_eq!(messages.len(), 2);
    assert!(messages[0].content.starts_with(
        "✅ Document processed successfully: notes.txt\n\n📊 **Document Stats:**\n- Characters: 12,500\n- Words: 2,500\n"
    ));
    assert!(messages[0]
        .content
        .ends_with("Now please select the actions you'd like to perform:"));
    assert_eq!(messages[1].content, action_list());
}

#[tokio::test]
async fn given_document_when_selecting_numbers_then_names_confirmed() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;

    let messages = reply(&service, session_id, "1,3").await;

    assert_eq!(
        messages,
        vec!["✅ Selected actions: Summarize Document, Extract Key Points\n\nType 'process' to execute these actions.".to_string()]
    );
}

#[tokio::test]
async fn given_document_when_selecting_all_then_all_confirmed() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;

    let messages = reply(&service, session_id, "ALL").await;

    assert_eq!(
        messages,
        vec!["✅ All actions selected! Type 'process' to execute.".to_string()]
    );
}

#[tokio::test]
async fn given_document_when_listing_every_number_then_names_confirmed() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;

    let messages = reply(&service, session_id, "1,2,3,4,5,6,7,8").await;

    assert_eq!(
        messages,
        vec![concat!(
            "✅ Selected actions: Summarize Document, Analyze Content, Extract Key Points, ",
            "Generate Questions, Identify Entities, Sentiment Analysis, Extract Action Items, ",
            "Language Detection\n\nType 'process' to execute these actions."
        )
        .to_string()]
    );
}

#[tokio::test]
async fn given_document_when_selection_is_invalid_then_specific_error_messages() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;

    let bad_format = reply(&service, session_id, "1,x").await;
    let out_of_range = reply(&service, session_id, "42").await;
    let chatter = reply(&service, session_id, "what now?").await;

    assert!(bad_format[0].starts_with("❌ Invalid input format."));
    assert!(out_of_range[0].starts_with("❌ Invalid action numbers."));
    assert!(chatter[0].starts_with("I didn't understand that."));
}

#[tokio::test]
async fn given_no_document_when_processing_then_upload_prompt() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    let messages = reply(&service, session_id, "process").await;

    assert_eq!(
        messages,
        vec!["❌ No document uploaded. Please upload a document first.".to_string()]
    );
}

#[tokio::test]
async fn given_document_without_selection_when_processing_then_selection_prompt() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;

    let messages = reply(&service, session_id, "process").await;

    assert_eq!(
        messages,
        vec!["❌ No actions selected. Please select actions first.".to_string()]
    );
}

#[tokio::test]
async fn given_document_and_selection_when_processing_then_status_report_and_completion() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;
    reply(&service, session_id, "2").await;

    let messages = reply(&service, session_id, "process").await;

    assert_eq!(messages.len(), 3);
    assert!(messages[0].starts_with(
        "🔄 Processing document 'notes.txt' with selected actions... (estimated ~"
    ));
    assert!(messages[1].starts_with(
        "# 📄 Document Analysis Results\n\n**Document:** notes.txt\n**Actions Completed:** 1\n\n---\n\nMock analysis"
    ));
    assert!(messages[2].starts_with("✨ Processing complete!"));
}

#[tokio::test]
async fn given_selection_when_new_document_uploaded_then_selection_cleared() {
    let service = chat_service();
    let session_id = session_with_document(&service).await;
    reply(&service, session_id, "all").await;

    service
        .upload(
            session_id,
            UploadedFile::inline("second.txt", b"A different document entirely.".to_vec()),
        )
        .await
        .unwrap();
    let messages = reply(&service, session_id, "process").await;

    assert_eq!(
        messages,
        vec!["❌ No actions selected. Please select actions first.".to_string()]
    );
}

#[tokio::test]
async fn given_session_when_ended_then_further_use_is_not_found() {
    let service = chat_service();
    let (session_id, _) = service.start_session().await.unwrap();

    service.end_session(session_id).await.unwrap();

    assert!(matches!(
        service.handle_message(session_id, "help").await,
        Err(ChatError::SessionNotFound(_))
    ));
    assert!(matches!(
        service.end_session(session_id).await,
        Err(ChatError::SessionNotFound(_))
    ));
}
