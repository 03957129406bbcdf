use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const DOCUMENT_PART: &str = "word/document.xml";
const CELL_SEPARATOR: &str = " | ";

/// Reads the main document part of a DOCX container: body paragraphs first,
/// then table rows flattened with `" | "` between cells.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to open DOCX container: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }
}

/// Walks `word/document.xml` keeping track of table nesting.
///
/// Paragraphs outside any table become body lines. Each row of a top-level
/// table becomes one line built from the direct paragraphs of its cells;
/// tables nested inside a cell contribute nothing.
#[derive(Default)]
struct DocumentWalker {
    body: Vec<String>,
    rows: Vec<String>,
    table_depth: usize,
    paragraph_depth: usize,
    paragraph: Option<String>,
    row: Option<Vec<String>>,
    cell: Option<Vec<String>>,
    in_run: bool,
    in_text: bool,
}

impl DocumentWalker {
    fn collects_paragraphs(&self) -> bool {
        self.table_depth == 0 || (self.table_depth == 1 && self.cell.is_some())
    }

    fn open(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => self.table_depth += 1,
            b"w:tr" if self.table_depth == 1 => self.row = Some(Vec::new()),
            b"w:tc" if self.table_depth == 1 => self.cell = Some(Vec::new()),
            b"w:p" => {
                self.paragraph_depth += 1;
                if self.paragraph_depth == 1 && self.collects_paragraphs() {
                    self.paragraph = Some(String::new());
                }
            }
            b"w:r" => self.in_run = true,
            b"w:t" => self.in_text = true,
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"w:tr" if self.table_depth == 1 => {
                let cells = self.row.take().unwrap_or_default();
                if !cells.is_empty() {
                    self.rows.push(cells.join(CELL_SEPARATOR));
                }
            }
            b"w:tc" if self.table_depth == 1 => {
                let text = self.cell.take().unwrap_or_default().join("\n");
                let text = text.trim();
                if let (false, Some(row)) = (text.is_empty(), self.row.as_mut()) {
                    row.push(text.to_string());
                }
            }
            b"w:p" => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.paragraph_depth == 0 {
                    if let Some(text) = self.paragraph.take() {
                        self.finish_paragraph(text);
                    }
                }
            }
            b"w:r" => self.in_run = false,
            b"w:t" => self.in_text = false,
            _ => {}
        }
    }

    /// Self-closing elements. Tab stops in paragraph properties are not runs.
    fn empty(&mut self, name: &[u8]) {
        if !self.in_run {
            return;
        }
        match name {
            b"w:tab" => self.push_text("\t"),
            b"w:br" | b"w:cr" => self.push_text("\n"),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_str(text);
        }
    }

    fn finish_paragraph(&mut self, text: String) {
        if self.table_depth == 0 {
            if !text.trim().is_empty() {
                self.body.push(text);
            }
        } else if let Some(cell) = self.cell.as_mut() {
            cell.push(text);
        }
    }

    fn into_text(self) -> String {
        let mut lines = self.body;
        lines.extend(self.rows);
        lines.join("\n")
    }
}

/// Text of every body paragraph in document order, followed by one line per
/// top-level table row.
pub fn extract_docx_text(xml: &str) -> Result<String, FileLoaderError> {
    let malformed = |e: quick_xml::Error| {
        FileLoaderError::ExtractionFailed(format!("malformed {DOCUMENT_PART}: {e}"))
    };

    let mut reader = Reader::from_str(xml);
    let mut walker = DocumentWalker::default();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(element) => walker.open(element.name().as_ref()),
            Event::End(element) => walker.close(element.name().as_ref()),
            Event::Empty(element) => walker.empty(element.name().as_ref()),
            Event::Text(text) if walker.in_text => {
                let text = text.unescape().map_err(malformed)?;
                walker.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.into_text())
}

#[async_trait]
impl FileLoader for DocxAdapter {
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
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let xml = Self::read_document_xml(data)?;
        let text = extract_docx_text(&xml)?;

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.display_name()));
        }

        tracing::info!(lines = text.lines().count(), "DOCX text extraction complete");
        Ok(text)
    }
}
