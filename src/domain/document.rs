use std::sync::Arc;

use serde::Serialize;

use super::DocumentId;

const MAX_FILENAME_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Docx,
    Text,
}

impl ContentType {
    /// Case-insensitive suffix match against the supported extensions.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".txt") {
            Some(Self::Text)
        } else {
            None
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Text => "text/plain",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Text => ".txt",
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            content_type,
            size_bytes,
        }
    }

    /// Filename safe for display and logs.
    pub fn display_name(&self) -> String {
        sanitize_filename(&self.filename)
    }
}

/// Replaces path and shell metacharacters with `_` and caps the length at 255
/// characters, keeping the extension.
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();

    if sanitized.chars().count() <= MAX_FILENAME_LENGTH {
        return sanitized;
    }

    let (stem, ext) = match sanitized.rfind('.') {
        Some(idx) if sanitized[..idx].chars().any(|c| c != '.') => {
            (&sanitized[..idx], &sanitized[idx..])
        }
        _ => (sanitized.as_str(), ""),
    };

    let keep = MAX_FILENAME_LENGTH.saturating_sub(ext.chars().count());
    let mut result: String = stem.chars().take(keep).collect();
    result.push_str(ext);
    result
}

/// Extracted document text. Clones share the same string instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent(Arc<str>);

impl DocumentContent {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn shares_instance_with(&self, other: &DocumentContent) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats::of(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentStats {
    pub character_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    pub paragraph_count: usize,
}

impl DocumentStats {
    pub fn of(text: &str) -> Self {
        Self {
            character_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            line_count: text.split('\n').count(),
            paragraph_count: text
                .split("\n\n")
                .filter(|p| !p.trim().is_empty())
                .count(),
        }
    }
}

/// The single live document of a session.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub content: DocumentContent,
}

impl LoadedDocument {
    pub fn new(document: Document, content: DocumentContent) -> Self {
        Self { document, content }
    }
}
