use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use lectern::application::ports::{FileLoader, FileLoaderError};
use lectern::domain::{ContentType, Document};
use lectern::infrastructure::text_processing::{
    CompositeFileLoader, DocxAdapter, PdfAdapter, PlainTextAdapter, TextEncoding,
    extract_docx_text, sanitize_extracted_text,
};

fn text_document(data: &[u8]) -> Document {
    Document::new("notes.txt".to_string(), ContentType::Text, data.len() as u64)
}

fn docx_document(data: &[u8]) -> Document {
    Document::new("report.docx".to_string(), ContentType::Docx, data.len() as u64)
}

fn pdf_document(data: &[u8]) -> Document {
    Document::new("scan.pdf".to_string(), ContentType::Pdf, data.len() as u64)
}

/// One-page PDF whose only content stream is empty.
fn build_blank_pdf() -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << >> >>"
            .to_string(),
        "<< /Length 0 >>\nstream\n\nendstream".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).into_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend(xref.into_bytes());
    pdf
}

fn build_docx(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

const BODY_WITH_TABLE: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<w:document><w:body>"#,
    r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Hello &amp; welcome</w:t></w:r></w:p>"#,
    r#"<w:p/>"#,
    r#"<w:tbl><w:tr>"#,
    r#"<w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc>"#,
    r#"<w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc>"#,
    r#"</w:tr></w:tbl>"#,
    r#"<w:p w:rsidR="00A1"><w:r><w:t xml:space="preserve">Second </w:t></w:r><w:r><w:t>paragraph</w:t></w:r></w:p>"#,
    r#"</w:body></w:document>"#,
);

#[tokio::test]
async fn given_utf8_with_crlf_when_extracting_then_newlines_normalized() {
    let data = b"first line\r\nsecond line\rthird";

    let text = PlainTextAdapter
        .extract_text(data, &text_document(data))
        .await
        .unwrap();

    assert_eq!(text, "first line\nsecond line\nthird");
}

#[tokio::test]
async fn given_utf16_le_with_bom_when_extracting_then_decoded() {
    let mut data = vec![0xFF, 0xFE];
    data.extend("hi there".encode_utf16().flat_map(|u| u.to_le_bytes()));

    let text = PlainTextAdapter
        .extract_text(&data, &text_document(&data))
        .await
        .unwrap();

    assert_eq!(text, "hi there");
}

#[tokio::test]
async fn given_latin1_bytes_when_extracting_then_falls_back_to_latin1() {
    let data = b"caf\xe9 au lait!";

    let text = PlainTextAdapter
        .extract_text(data, &text_document(data))
        .await
        .unwrap();

    assert_eq!(text, "café au lait!");
}

#[tokio::test]
async fn given_blank_file_when_extracting_then_decode_failure() {
    let data = b"   \n ";

    let result = PlainTextAdapter
        .extract_text(data, &text_document(data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_non_text_document_when_plain_adapter_extracts_then_unsupported() {
    let result = PlainTextAdapter
        .extract_text(b"data", &docx_document(b"data"))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[test]
fn given_cp1252_bytes_when_decoding_then_unassigned_bytes_fail() {
    assert_eq!(TextEncoding::Cp1252.decode(&[0x80]), Some("€".to_string()));
    assert_eq!(TextEncoding::Cp1252.decode(&[0x81]), None);
    assert_eq!(TextEncoding::Utf16.decode(&[0x61]), None);
}

#[test]
fn given_document_xml_when_extracting_then_paragraphs_then_table_rows() {
    let text = extract_docx_text(BODY_WITH_TABLE).unwrap();

    assert_eq!(text, "Hello & welcome\nSecond paragraph\nA1 | B1");
}

#[test]
fn given_table_nested_in_cell_when_extracting_then_outer_rows_stay_intact() {
    let xml = concat!(
        r#"<w:document><w:body>"#,
        r#"<w:p><w:r><w:t>Body para</w:t></w:r></w:p>"#,
        r#"<w:tbl>"#,
        r#"<w:tr>"#,
        r#"<w:tc>"#,
        r#"<w:p><w:r><w:t>OuterA</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t>OuterB</w:t></w:r></w:p>"#,
        r#"</w:tc>"#,
        r#"<w:tc><w:p><w:r><w:t>Side</w:t></w:r></w:p></w:tc>"#,
        r#"</w:tr>"#,
        r#"<w:tr>"#,
        r#"<w:tc><w:p><w:r><w:t>Row2</w:t></w:r></w:p></w:tc>"#,
        r#"<w:tc><w:p><w:r><w:t>Cell2</w:t></w:r></w:p></w:tc>"#,
        r#"</w:tr>"#,
        r#"</w:tbl>"#,
        r#"</w:body></w:document>"#,
    );

    let text = extract_docx_text(xml).unwrap();

    assert_eq!(text, "Body para\nOuterA\nOuterB | Side\nRow2 | Cell2");
    assert!(text.lines().any(|line| line == "Row2 | Cell2"));
    assert!(!text.contains("Inner"));
}

#[test]
fn given_runs_with_breaks_and_entities_when_extracting_then_reader_decodes_them() {
    let xml = concat!(
        r#"<w:document><w:body>"#,
        r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>"#,
        r#"<w:r><w:t>caf&#233;</w:t><w:tab/><w:t>&lt;menu&gt;</w:t><w:br/><w:t>&#x41;</w:t></w:r></w:p>"#,
        r#"</w:body></w:document>"#,
    );

    let text = extract_docx_text(xml).unwrap();

    assert_eq!(text, "café\t<menu>\nA");
}

#[test]
fn given_unbalanced_document_xml_when_extracting_then_extraction_failed() {
    let result = extract_docx_text("<w:document><w:body><w:p></w:tbl></w:body></w:document>");

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_container_when_extracting_then_document_part_text_returned() {
    let data = build_docx(BODY_WITH_TABLE);

    let text = DocxAdapter::new()
        .extract_text(&data, &docx_document(&data))
        .await
        .unwrap();

    assert_eq!(text, "Hello & welcome\nSecond paragraph\nA1 | B1");
}

#[tokio::test]
async fn given_docx_without_text_when_extracting_then_no_text_found() {
    let data = build_docx("<w:document><w:body><w:p/></w:body></w:document>");

    let result = DocxAdapter::new()
        .extract_text(&data, &docx_document(&data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_extracting_docx_then_extraction_failed() {
    let data = b"definitely not a zip archive";

    let result = DocxAdapter::new()
        .extract_text(data, &docx_document(data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_then_no_text_found() {
    let data = build_blank_pdf();

    let result = PdfAdapter::new()
        .extract_text(&data, &pdf_document(&data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(name)) if name == "scan.pdf"));
}

#[tokio::test]
async fn given_corrupt_pdf_bytes_when_extracting_then_extraction_failed() {
    let data = b"%PDF-1.4 truncated garbage";

    let result = PdfAdapter::new()
        .extract_text(data, &pdf_document(data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_when_sent_to_pdf_adapter_then_unsupported() {
    let data = build_docx(BODY_WITH_TABLE);

    let result = PdfAdapter::new()
        .extract_text(&data, &docx_document(&data))
        .await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[tokio::test]
async fn given_default_composite_loader_when_extracting_then_routes_by_content_type() {
    let loader = CompositeFileLoader::with_default_adapters();
    let docx = build_docx(BODY_WITH_TABLE);
    let text = b"plain text body";

    assert!(loader.supports(ContentType::Pdf));
    assert_eq!(
        loader
            .extract_text(text, &text_document(text))
            .await
            .unwrap(),
        "plain text body"
    );
    assert!(
        loader
            .extract_text(&docx, &docx_document(&docx))
            .await
            .unwrap()
            .starts_with("Hello & welcome")
    );
}

#[tokio::test]
async fn given_composite_without_adapter_when_extracting_then_unsupported() {
    let loader = CompositeFileLoader::new(Vec::new());

    let result = loader.extract_text(b"x", &text_document(b"x")).await;

    assert!(!loader.supports(ContentType::Text));
    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[test]
fn given_ligatures_and_hyphenation_when_sanitizing_then_normalized_and_joined() {
    let text = sanitize_extracted_text("The \u{FB01}nal hyph-\nenated   word");

    assert_eq!(text, "The final hyphenated word");
}

#[test]
fn given_blank_line_runs_when_sanitizing_then_single_paragraph_break() {
    let text = sanitize_extracted_text("  first block  \n\n\n\n second\u{0007} block ");

    assert_eq!(text, "first block\n\nsecond block");
}
