mod analysis_service;
mod chat_service;
pub mod content_chunker;
pub mod content_validator;
mod document_service;
pub mod prompt_compiler;
pub mod response_formatter;
pub mod section_extractor;
mod token_counter;

pub use analysis_service::{
    AnalysisError, AnalysisOptions, AnalysisService, ContentBounding, estimate_processing_time,
};
pub use chat_service::{ChatCommand, ChatError, ChatService, action_list, format_thousands};
pub use content_chunker::{ContentChunker, chunk_content, truncate_content};
pub use content_validator::{validate_content, validate_raw};
pub use document_service::{DocumentError, DocumentLoad, DocumentService, UploadedFile};
pub use prompt_compiler::compile_prompt;
pub use response_formatter::{GenerationFailurePolicy, format_response, generation_failure_body};
pub use section_extractor::extract_sections;
pub use token_counter::count_tokens;
