use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, DocumentContent, LoadedDocument, ValidationResult};

use super::content_validator::validate_content;

/// A file handed over by the chat transport: inline bytes or a readable path,
/// never both.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Option<Vec<u8>>,
    pub path: Option<PathBuf>,
}

impl UploadedFile {
    pub fn inline(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: Some(content),
            path: None,
        }
    }

    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            content: None,
            path: Some(path.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentLoad {
    pub document: LoadedDocument,
    pub validation: ValidationResult,
}

pub struct DocumentService<F>
where
    F: FileLoader + ?Sized,
{
    file_loader: Arc<F>,
}

impl<F> DocumentService<F>
where
    F: FileLoader + ?Sized,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self { file_loader }
    }

    pub fn is_supported_file(filename: &str) -> bool {
        ContentType::from_filename(filename).is_some()
    }

    #[tracing::instrument(skip(self, upload), fields(filename = %upload.name))]
    pub async fn load(&self, upload: UploadedFile) -> Result<DocumentLoad, DocumentError> {
        let content_type = ContentType::from_filename(&upload.name)
            .ok_or_else(|| DocumentError::UnsupportedFileType(upload.name.clone()))?;

        let data = match (upload.content, upload.path) {
            (Some(bytes), None) => bytes,
            (None, Some(path)) => tokio::fs::read(&path).await.map_err(|e| {
                DocumentError::InvalidUpload(format!("failed to read {}: {e}", path.display()))
            })?,
            (Some(_), Some(_)) => {
                return Err(DocumentError::InvalidUpload(
                    "upload carries both inline content and a path".to_string(),
                ));
            }
            (None, None) => {
                return Err(DocumentError::InvalidUpload(
                    "upload carries neither content nor a path".to_string(),
                ));
            }
        };

        let document = Document::new(upload.name, content_type, data.len() as u64);
        tracing::debug!(
            document_id = %document.id.as_uuid(),
            content_type = document.content_type.as_mime(),
            bytes = document.size_bytes,
            "Extracting document text"
        );

        let text = self
            .file_loader
            .extract_text(&data, &document)
            .await
            .map_err(DocumentError::Extraction)?;

        let validation = validate_content(&text);
        if !validation.is_valid {
            tracing::warn!(issues = ?validation.issues, "Document failed validation");
            return Err(DocumentError::Validation(validation));
        }

        for warning in &validation.warnings {
            tracing::warn!(warning = %warning, "Document validation warning");
        }

        tracing::info!(
            document_id = %document.id.as_uuid(),
            characters = validation.stats.character_count,
            words = validation.stats.word_count,
            "Document loaded"
        );

        Ok(DocumentLoad {
            document: LoadedDocument::new(document, DocumentContent::new(text)),
            validation,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("validation failed: {}", .0.issues.join("; "))]
    Validation(ValidationResult),
}
