use std::borrow::Cow;
use std::sync::Arc;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{LoadedDocument, Report, SelectedActionSet};

use super::content_chunker::{
    ContentChunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TRUNCATION_LENGTH,
    truncate_content,
};
use super::prompt_compiler::compile_prompt;
use super::response_formatter::GenerationFailurePolicy;
use super::token_counter::count_tokens;

/// How content larger than the backend's comfortable input is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBounding {
    /// Send the whole document.
    None,
    /// Send a sentence-aware prefix with a truncation note.
    #[default]
    Truncate,
    /// Send one request per chunk and merge the answers in chunk order.
    Chunk,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub bounding: ContentBounding,
    pub max_content_chars: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub failure_policy: GenerationFailurePolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            bounding: ContentBounding::default(),
            max_content_chars: DEFAULT_TRUNCATION_LENGTH,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            failure_policy: GenerationFailurePolicy::default(),
        }
    }
}

pub struct AnalysisService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
    options: AnalysisOptions,
}

impl<L> AnalysisService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, options: AnalysisOptions) -> Self {
        Self {
            llm_client,
            options,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Prompts for the document as they would be sent, one per request.
    pub fn compile_requests(
        &self,
        document: &LoadedDocument,
        selection: &SelectedActionSet,
    ) -> Vec<String> {
        let content = document.content.as_str();
        let keys = selection.keys();

        match self.options.bounding {
            ContentBounding::None => vec![compile_prompt(content, keys)],
            ContentBounding::Truncate => {
                let bounded: Cow<'_, str> =
                    truncate_content(content, self.options.max_content_chars);
                vec![compile_prompt(&bounded, keys)]
            }
            ContentBounding::Chunk => {
                ContentChunker::new(self.options.chunk_size, self.options.chunk_overlap)
                    .chunk(content)
                    .into_iter()
                    .map(|chunk| compile_prompt(chunk, keys))
                    .collect()
            }
        }
    }

    #[tracing::instrument(
        skip(self, document, selection, cancellation),
        fields(
            document_id = %document.document.id.as_uuid(),
            actions = selection.len(),
        )
    )]
    pub async fn analyze(
        &self,
        document: &LoadedDocument,
        selection: &SelectedActionSet,
        cancellation: &CancellationToken,
    ) -> Result<Report, AnalysisError> {
        if selection.is_empty() {
            return Err(AnalysisError::NoActionsSelected);
        }

        if !selection.is_for(document.document.id) {
            return Err(AnalysisError::StaleSelection);
        }

        let prompts = self.compile_requests(document, selection);
        let total = prompts.len();
        let mut answers = Vec::with_capacity(total);

        for (index, prompt) in prompts.iter().enumerate() {
            tracing::debug!(
                part = index + 1,
                parts = total,
                prompt_tokens = count_tokens(prompt),
                "Sending analysis request"
            );

            let outcome = tokio::select! {
                _ = cancellation.cancelled() => {
                    tracing::info!("Analysis cancelled");
                    return Err(AnalysisError::Cancelled);
                }
                result = self.llm_client.complete(prompt) => result,
            };

            match outcome {
                Ok(answer) => answers.push(answer),
                Err(e) => {
                    tracing::error!(error = %e, part = index + 1, "Text generation failed");
                    match self.options.failure_policy.fold(&e) {
                        Some(body) => {
                            return Ok(Report::new(
                                Some(&document.document.display_name()),
                                selection.len(),
                                body,
                            ));
                        }
                        None => return Err(AnalysisError::Generation(e)),
                    }
                }
            }
        }

        let body = merge_answers(answers);
        if body.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        Ok(Report::new(
            Some(&document.document.display_name()),
            selection.len(),
            body,
        ))
    }
}

fn merge_answers(mut answers: Vec<String>) -> String {
    if answers.len() == 1 {
        return answers.remove(0);
    }

    let total = answers.len();
    answers
        .into_iter()
        .enumerate()
        .map(|(i, answer)| format!("## Part {} of {}\n\n{}", i + 1, total, answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rough wall-clock estimate shown before processing starts.
pub fn estimate_processing_time(content_length: usize, action_count: usize) -> String {
    let base_seconds = (content_length as f64 / 1000.0 * 2.0).min(60.0);
    let action_seconds = (action_count * 5) as f64;
    let total_seconds = (base_seconds + action_seconds) as u64;

    if total_seconds < 60 {
        format!("~{total_seconds} seconds")
    } else {
        format!("~{}m {}s", total_seconds / 60, total_seconds % 60)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no actions selected")]
    NoActionsSelected,
    #[error("selection was made for a different document")]
    StaleSelection,
    #[error("text generation returned an empty response")]
    EmptyResponse,
    #[error("analysis cancelled")]
    Cancelled,
    #[error("generation: {0}")]
    Generation(LlmClientError),
}
