use crate::domain::entities::{Ticket, TicketEvent, TicketUpdate};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait TicketRepository: Send + Sync {
    /// Canonical collection in display order (newest creations first)
    async fn list_tickets(&self) -> DomainResult<Vec<Ticket>>;

    async fn get_ticket_by_id(&self, id: &str) -> DomainResult<Option<Ticket>>;

    /// Insert at the head of the collection; ids must be unique
    async fn create_ticket(&self, ticket: &Ticket) -> DomainResult<()>;

    async fn update_ticket(
        &self,
        id: &str,
        update: TicketUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<Ticket>;

    async fn append_ticket_event(&self, event: &TicketEvent) -> DomainResult<Ticket>;
}
