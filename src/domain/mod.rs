pub mod action;
mod document;
mod document_id;
mod report;
mod section;
mod selection;
mod session;
mod session_id;
mod validation;

pub use action::{Action, action_description, available_actions, find_action, validate_actions};
pub use document::{
    ContentType, Document, DocumentContent, DocumentStats, LoadedDocument, sanitize_filename,
};
pub use document_id::DocumentId;
pub use report::{Report, UNKNOWN_DOCUMENT};
pub use section::{Section, Sections};
pub use selection::{SelectedActionSet, SelectionError, parse_selection};
pub use session::{AssistantMessage, Session};
pub use session_id::SessionId;
pub use validation::ValidationResult;
