use crate::domain::entities::Session;
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn list_sessions(&self) -> DomainResult<Vec<Session>>;
    async fn get_session_by_id(&self, id: &str) -> DomainResult<Option<Session>>;
}
