use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts PDF text page by page and marks each page with `--- Page N ---`.
#[derive(Default)]
pub struct PdfAdapter;

/// Raw text of one page, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PdfPage {
    number: usize,
    text: String,
}

impl PdfPage {
    /// `None` for pages that hold nothing after sanitizing.
    fn render(&self) -> Option<String> {
        let text = sanitize_extracted_text(&self.text);
        (!text.is_empty()).then(|| format!("--- Page {} ---\n{}", self.number, text))
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Runs on a blocking thread. The scratch file lives only as long as this call.
    fn read_pages(data: Vec<u8>) -> Result<Vec<PdfPage>, FileLoaderError> {
        let mut scratch = tempfile::Builder::new()
            .suffix(ContentType::Pdf.extension())
            .tempfile()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("scratch file: {e}")))?;
        scratch
            .write_all(&data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("scratch file: {e}")))?;

        let mut pdf = PdfDocument::open(scratch.path())
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("Error reading PDF: {e}")))?;
        let page_count = pdf
            .page_count()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("Error reading PDF: {e}")))?;

        (0..page_count)
            .map(|index| {
                pdf.extract_text(index)
                    .map(|text| PdfPage {
                        number: index + 1,
                        text,
                    })
                    .map_err(|e| {
                        FileLoaderError::ExtractionFailed(format!(
                            "Error reading PDF page {}: {e}",
                            index + 1
                        ))
                    })
            })
            .collect()
    }
}

/// Joins the non-blank pages as marked blocks separated by a blank line.
fn compose_pages(pages: &[PdfPage], filename: String) -> Result<String, FileLoaderError> {
    let blocks: Vec<String> = pages.iter().filter_map(PdfPage::render).collect();
    if blocks.is_empty() {
        return Err(FileLoaderError::NoTextFound(filename));
    }
    Ok(blocks.join("\n\n"))
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.display_name(),
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let data = data.to_vec();
        let pages = match tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(data)),
        )
        .await
        {
            Ok(Ok(pages)) => pages?,
            Ok(Err(join_error)) => {
                return Err(FileLoaderError::ExtractionFailed(format!(
                    "PDF worker failed: {join_error}"
                )));
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = EXTRACTION_TIMEOUT.as_secs(),
                    "PDF extraction timed out"
                );
                return Err(FileLoaderError::ExtractionFailed(
                    "PDF extraction timed out".to_string(),
                ));
            }
        };

        let text = compose_pages(&pages, document.display_name())?;
        tracing::info!(pages = pages.len(), "PDF text extraction complete");
        Ok(text)
    }
}
