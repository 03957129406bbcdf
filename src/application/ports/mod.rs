mod file_loader;
mod llm_client;
mod session_repository;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use session_repository::{SessionRepository, SessionRepositoryError};
