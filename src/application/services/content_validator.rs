use crate::domain::{DocumentStats, ValidationResult};

pub const MIN_CONTENT_CHARS: usize = 10;
pub const LONG_CONTENT_CHARS: usize = 50_000;

/// Gates extracted text before analysis. Never fails; every problem is reported
/// as an issue (invalidating) or a warning.
pub fn validate_content(content: &str) -> ValidationResult {
    check(content, true)
}

/// Validates raw bytes, reporting content that is not valid UTF-8. The other
/// rules run against the lossy decoding.
///
/// Standalone entry point for callers holding undecoded bytes; uploads go
/// through the adapters and [`validate_content`].
pub fn validate_raw(raw: &[u8]) -> ValidationResult {
    match std::str::from_utf8(raw) {
        Ok(text) => check(text, true),
        Err(_) => check(&String::from_utf8_lossy(raw), false),
    }
}

fn check(content: &str, encodable: bool) -> ValidationResult {
    let mut result = ValidationResult::new(DocumentStats::of(content));
    let trimmed = content.trim();

    if trimmed.chars().count() < MIN_CONTENT_CHARS {
        result.reject("Document content is too short (less than 10 characters)");
    }

    if result.stats.character_count > LONG_CONTENT_CHARS {
        result.warn("Document is very long and may take significant time to process");
    }

    if !encodable {
        result.reject("Document contains characters that cannot be processed");
    }

    if trimmed.is_empty() {
        result.reject("Document appears to be empty or contains no readable text");
    }

    result
}
