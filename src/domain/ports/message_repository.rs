use crate::domain::entities::{EndConfirmationStatus, Message};
use crate::domain::errors::DomainResult;

#[async_trait::async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create_message(&self, message: &Message) -> DomainResult<()>;

    async fn get_message_by_id(&self, message_id: &str) -> DomainResult<Option<Message>>;

    /// Messages whose `session_id` equals `session_id`, in append order
    async fn list_messages(&self, session_id: &str) -> DomainResult<Vec<Message>>;

    async fn mark_message_deleted(&self, message_id: &str) -> DomainResult<Message>;

    /// Compare-and-set on the card status: applies only while the stored
    /// status is `Pending`. Returns the message as stored afterwards.
    async fn update_end_confirmation_status(
        &self,
        message_id: &str,
        status: EndConfirmationStatus,
    ) -> DomainResult<Message>;
}
