use serde::Deserialize;

use crate::application::ports::LlmClientError;
use crate::domain::Report;

/// What the analysis pipeline does when the text-generation call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationFailurePolicy {
    /// The error description becomes the report body, shown like any other answer.
    #[default]
    EmbedInReport,
    /// The error is returned to the caller.
    Propagate,
}

impl GenerationFailurePolicy {
    /// `Some(body)` when the failure is folded into the report.
    pub fn fold(&self, error: &LlmClientError) -> Option<String> {
        match self {
            Self::EmbedInReport => Some(generation_failure_body(error)),
            Self::Propagate => None,
        }
    }
}

pub fn generation_failure_body(error: &LlmClientError) -> String {
    format!(
        "Error processing with AI: {error}\n\nPlease check your API configuration and try again."
    )
}

/// Wraps a raw backend answer in the report envelope. The answer is passed
/// through untouched.
///
/// Standalone entry point for library callers; the analysis pipeline builds a
/// [`Report`](crate::domain::Report) and renders it itself.
pub fn format_response<S: AsRef<str>>(
    raw_response: &str,
    selected_action_keys: &[S],
    document_name: Option<&str>,
) -> String {
    Report::new(
        document_name,
        selected_action_keys.len(),
        raw_response.to_string(),
    )
    .render()
}
