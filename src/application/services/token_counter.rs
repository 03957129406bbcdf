use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

const CHARS_PER_TOKEN: usize = 4;

static TOKENIZER: LazyLock<Option<CoreBPE>> = LazyLock::new(|| match tiktoken_rs::cl100k_base() {
    Ok(bpe) => Some(bpe),
    Err(e) => {
        tracing::warn!(error = %e, "cl100k_base unavailable, estimating tokens from length");
        None
    }
});

/// Prompt size in cl100k tokens, or a length-based estimate when the
/// tokenizer cannot be built.
pub fn count_tokens(text: &str) -> usize {
    match TOKENIZER.as_ref() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(CHARS_PER_TOKEN),
    }
}
