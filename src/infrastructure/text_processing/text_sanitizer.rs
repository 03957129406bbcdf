use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Normalizes text pulled out of page-oriented formats: NFKC (ligatures),
/// rejoined line-end hyphenation, stray control characters dropped, runs of
/// spaces collapsed and blank-line runs reduced to one paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let joined = BROKEN_WORD.replace_all(&normalized, "$head$tail");

    let paragraphs: Vec<String> = joined
        .split("\n")
        .map(str::trim)
        .collect::<Vec<_>>()
        .split(|line| line.is_empty())
        .filter(|block| !block.is_empty())
        .map(|block| {
            block
                .iter()
                .map(|line| collapse_spaces(line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    paragraphs.join("\n\n")
}

fn collapse_spaces(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
