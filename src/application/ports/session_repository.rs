use async_trait::async_trait;

use crate::domain::{Session, SessionId};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    async fn get(&self, id: SessionId) -> Result<Option<Session>, SessionRepositoryError>;

    async fn save(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    async fn remove(&self, id: SessionId) -> Result<Option<Session>, SessionRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionRepositoryError {
    #[error("session already exists: {0}")]
    AlreadyExists(SessionId),
    #[error("session not found: {0}")]
    NotFound(SessionId),
}
