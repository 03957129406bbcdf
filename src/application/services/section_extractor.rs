use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Sections;

const INITIAL_SECTION: &str = "Introduction";
const MAX_HEADER_LENGTH: usize = 100;

static NUMBERED_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.").unwrap());
static CAPS_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s]+$").unwrap());

/// Segments text into titled sections using header-like lines. Text before the
/// first header lands under "Introduction". A repeated title overwrites the
/// earlier body.
///
/// Standalone entry point for library callers; the chat pipeline does not
/// segment documents.
pub fn extract_sections(content: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current_title = INITIAL_SECTION.to_string();
    let mut buffer: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if is_header(line) {
            if !buffer.is_empty() {
                sections.insert(current_title, buffer.join("\n").trim().to_string());
            }
            current_title = line.trim().to_string();
            buffer.clear();
        } else {
            buffer.push(line);
        }
    }

    if !buffer.is_empty() {
        sections.insert(current_title, buffer.join("\n").trim().to_string());
    }

    sections
}

pub fn is_header(line: &str) -> bool {
    let trimmed = line.trim();

    trimmed.chars().count() < MAX_HEADER_LENGTH
        && (is_upper(line) || NUMBERED_HEADER.is_match(trimmed) || CAPS_HEADER.is_match(trimmed))
}

/// At least one cased character and no lower-case ones.
fn is_upper(line: &str) -> bool {
    let mut has_cased = false;
    for ch in line.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
