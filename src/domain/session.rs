use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::{LoadedDocument, SelectedActionSet, SessionId};

/// Per-session context: at most one live document and one selection.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub document: Option<LoadedDocument>,
    pub selection: SelectedActionSet,
    pub cancellation: CancellationToken,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            document: None,
            selection: SelectedActionSet::empty(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the live document; any selection made for the previous one is dropped.
    pub fn replace_document(&mut self, document: LoadedDocument) {
        self.document = Some(document);
        self.selection = SelectedActionSet::empty();
    }

    pub fn select(&mut self, selection: SelectedActionSet) {
        self.selection = selection;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantMessage {
    pub content: String,
}

impl AssistantMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
