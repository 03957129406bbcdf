use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Decodings tried in order; the first yielding non-blank text wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Latin1,
    Cp1252,
}

impl TextEncoding {
    pub const FALLBACK_ORDER: [TextEncoding; 4] =
        [Self::Utf8, Self::Utf16, Self::Latin1, Self::Cp1252];

    pub fn decode(&self, data: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(data).ok().map(str::to_string),
            Self::Utf16 => decode_utf16(data),
            Self::Latin1 => Some(data.iter().map(|&b| b as char).collect()),
            Self::Cp1252 => data.iter().map(|&b| cp1252_char(b)).collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Latin1 => "latin1",
            Self::Cp1252 => "cp1252",
        }
    }
}

/// BOM-aware; little-endian when no BOM is present.
fn decode_utf16(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let (body, big_endian) = match data {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (data, false),
    };

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

/// Windows-1252; the five unassigned bytes do not decode.
fn cp1252_char(byte: u8) -> Option<char> {
    const HIGH: [Option<char>; 32] = [
        Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
        Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
        None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
        Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
    ];

    match byte {
        0x80..=0x9F => HIGH[(byte - 0x80) as usize],
        other => Some(other as char),
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        for encoding in TextEncoding::FALLBACK_ORDER {
            if let Some(text) = encoding.decode(data) {
                if !text.trim().is_empty() {
                    tracing::debug!(encoding = encoding.as_str(), "Decoded text file");
                    return Ok(normalize_newlines(&text));
                }
            }
        }

        Err(FileLoaderError::ExtractionFailed(
            "Unable to decode text file with supported encodings".to_string(),
        ))
    }
}
