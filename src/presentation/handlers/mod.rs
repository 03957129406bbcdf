mod actions;
mod documents;
mod health;
mod messages;
mod responses;
mod sessions;

pub use actions::{ActionSummary, ActionsResponse, list_actions_handler};
pub use documents::upload_document_handler;
pub use health::health_handler;
pub use messages::{MessageRequest, post_message_handler};
pub use responses::{ConversationResponse, ErrorResponse, MessageBody};
pub use sessions::{create_session_handler, delete_session_handler};
