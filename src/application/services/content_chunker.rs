use std::borrow::Cow;
use std::iter;
use std::ops::Range;

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 500;
pub const DEFAULT_TRUNCATION_LENGTH: usize = 15_000;

/// Distance around the raw cut searched for a sentence end.
const BOUNDARY_WINDOW: usize = 200;
/// A truncation only snaps back to a sentence end found in the last 20%.
const TRUNCATION_BOUNDARY_RATIO: f64 = 0.8;

/// Splits long text into sentence-aware segments. Offsets are counted in chars.
#[derive(Debug, Clone, Copy)]
pub struct ContentChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ContentChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Char ranges of each chunk, in processing order.
    pub fn ranges(&self, content: &str) -> Vec<Range<usize>> {
        let chars: Vec<char> = content.chars().collect();
        let total_len = chars.len();

        if total_len <= self.chunk_size {
            return vec![0..total_len];
        }

        let mut ranges = Vec::new();
        let mut start = 0;

        while start < total_len {
            let mut end = start + self.chunk_size;

            if end < total_len {
                let window_start = (start + self.chunk_size)
                    .saturating_sub(BOUNDARY_WINDOW)
                    .max(start);
                let window_end = (end + BOUNDARY_WINDOW).min(total_len);

                if let Some(pos) = chars[window_start..window_end]
                    .iter()
                    .rposition(|&c| c == '.')
                {
                    let sentence_end = window_start + pos;
                    if sentence_end > start {
                        end = sentence_end + 1;
                    }
                }
            }

            let end = end.min(total_len);
            ranges.push(start..end);

            // Forward progress holds even when overlap >= chunk_size.
            start = (start + self.chunk_size)
                .saturating_sub(self.chunk_overlap)
                .max(end);
        }

        ranges
    }

    pub fn chunk<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let offsets: Vec<usize> = content
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(content.len()))
            .collect();

        self.ranges(content)
            .into_iter()
            .map(|range| &content[offsets[range.start]..offsets[range.end]])
            .collect()
    }
}

impl Default for ContentChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

/// Standalone entry point for library callers; [`AnalysisService`](super::AnalysisService)
/// drives [`ContentChunker`] directly.
pub fn chunk_content(content: &str, chunk_size: usize, overlap: usize) -> Vec<&str> {
    ContentChunker::new(chunk_size, overlap).chunk(content)
}

/// Cuts content to `max_length` chars, preferring a sentence end in the last 20%
/// of the cut, and appends a note with the kept length.
pub fn truncate_content(content: &str, max_length: usize) -> Cow<'_, str> {
    let cut = match content.char_indices().nth(max_length) {
        Some((idx, _)) => idx,
        None => return Cow::Borrowed(content),
    };

    let mut truncated = &content[..cut];

    if let Some(last_period) = truncated.rfind('.') {
        let period_position = truncated[..last_period].chars().count();
        if period_position as f64 > max_length as f64 * TRUNCATION_BOUNDARY_RATIO {
            truncated = &truncated[..=last_period];
        }
    }

    let kept = truncated.chars().count();
    Cow::Owned(format!(
        "{truncated}\n\n[Note: Document was truncated to {kept} characters for processing]"
    ))
}
