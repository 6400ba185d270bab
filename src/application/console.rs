use crate::application::services::{
    AudioService, CallPanelController, EndConfirmationService, MessageService, TicketLookup,
    TicketService,
};
use crate::application::state::{ActiveView, ConsoleState, TicketSelection};
use crate::domain::entities::{Session, SessionStatus, Ticket, TicketDraft, TicketUpdate, UserRole};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use crate::domain::services::{filter_sessions, GridFilterCriteria};
use crate::infrastructure::persistence::MemoryStore;
use crate::infrastructure::seed::mock_dataset;
use crate::shared::i18n::Language;
use crate::shared::utils::deep_link::ticket_id_from_query;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Everything a console view needs, shared by clone
#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub event_bus: Arc<dyn EventBus>,
    pub time: Arc<dyn TimeService>,
    pub spawner: Arc<dyn TaskSpawner>,
    pub ticket_service: TicketService,
    pub message_service: MessageService,
    pub end_confirmation_service: EndConfirmationService,
    pub audio_service: AudioService,
    pub call_link_confirm_delay: Duration,
    pub console: Arc<RwLock<ConsoleState>>,
}

impl AppState {
    pub async fn snapshot(&self) -> ConsoleState {
        self.console.read().await.clone()
    }

    pub async fn set_view(&self, view: ActiveView) {
        self.console.write().await.set_view(view);
    }

    pub async fn select_session(&self, session_id: &str) -> DomainResult<Session> {
        let session = self
            .store
            .get_session_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Session {} not found", session_id)))?;
        self.console.write().await.select_session(session_id);
        Ok(session)
    }

    /// Session list for a status tab and search box
    pub async fn sessions(&self, status: SessionStatus, search: &str) -> DomainResult<Vec<Session>> {
        let all = self.store.list_sessions().await?;
        Ok(filter_sessions(&all, status, search))
    }

    pub async fn toggle_role(&self) -> UserRole {
        let (user_id, role) = {
            let mut console = self.console.write().await;
            let role = console.toggle_role();
            (console.current_user.id.clone(), role)
        };

        tracing::info!("User {} switched role to {}", user_id, role);
        let _ = self.event_bus.publish(ConsoleEvent::RoleChanged { user_id, role });
        role
    }

    /// Reseed every collection in the new language. The role survives; the
    /// selected ticket survives if the new data still has it.
    pub async fn switch_language(&self, language: Language) -> DomainResult<()> {
        let dataset = mock_dataset(language, Utc::now());
        self.store.reseed(&dataset).await;

        let first_ticket = dataset.tickets.first().map(|t| t.id.clone());
        {
            let mut console = self.console.write().await;
            let role = console.current_user.role;
            console.current_user = dataset.current_user.clone();
            console.current_user.role = role;
            console.language = language;

            let current = console
                .standalone_ticket_id
                .as_deref()
                .or_else(|| console.selection.ticket_id());
            let kept = current.is_some_and(|id| dataset.tickets.iter().any(|t| t.id == id));
            if !kept {
                if let Some(id) = first_ticket {
                    console.selection = TicketSelection::Existing(id);
                }
            }
        }

        tracing::info!("Console language switched to {}", language);
        let _ = self.event_bus.publish(ConsoleEvent::LanguageChanged { language });
        Ok(())
    }

    /// Tickets for the active view; the chat view yields none
    pub async fn visible_tickets(&self) -> DomainResult<Vec<Ticket>> {
        let (view, user) = {
            let console = self.console.read().await;
            (console.active_view, console.current_user.clone())
        };
        match view.ticket_view() {
            Some(view) => self.ticket_service.visible_tickets(view, &user).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn ticket_grid(&self, criteria: &GridFilterCriteria) -> DomainResult<Vec<Ticket>> {
        let (view, user) = {
            let console = self.console.read().await;
            (console.active_view, console.current_user.clone())
        };
        match view.ticket_view() {
            Some(view) => self.ticket_service.ticket_grid(view, &user, criteria).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn select_ticket(&self, ticket_id: &str) {
        self.console.write().await.select_ticket(ticket_id);
    }

    pub async fn start_new_ticket(&self) {
        self.console.write().await.start_new_ticket();
    }

    /// Save the new-ticket form and select the created ticket
    pub async fn create_ticket(&self, draft: TicketDraft) -> DomainResult<Ticket> {
        let user = self.console.read().await.current_user.clone();
        let ticket = self.ticket_service.create_ticket(draft, &user).await?;
        self.console.write().await.select_ticket(ticket.id.clone());
        Ok(ticket)
    }

    pub async fn close_drawer(&self) {
        self.console.write().await.close_drawer();
    }

    /// Save edits to the selected ticket, or to the deep-linked one
    pub async fn save_active_ticket(&self, update: TicketUpdate) -> DomainResult<Ticket> {
        let (selected, user) = {
            let console = self.console.read().await;
            let target = console
                .selection
                .ticket_id()
                .or(console.standalone_ticket_id.as_deref())
                .map(str::to_string);
            (target, console.current_user.clone())
        };
        let id = selected
            .ok_or_else(|| DomainError::ValidationError("No ticket selected".to_string()))?;
        self.ticket_service.update_ticket(&id, update, &user).await
    }

    /// Resolve a `?ticketId=...` query into the standalone ticket view
    pub async fn open_deep_link(&self, query: &str) -> DomainResult<Option<TicketLookup>> {
        let Some(id) = ticket_id_from_query(query) else {
            return Ok(None);
        };
        let lookup = self.ticket_service.find_ticket(&id).await?;
        if let TicketLookup::NotFound(missing) = &lookup {
            tracing::warn!("Deep-linked ticket {} not found", missing);
        }
        self.console.write().await.standalone_ticket_id = Some(id);
        Ok(Some(lookup))
    }

    /// Open the dialer, pre-linked to the active session's customer
    pub async fn open_call_panel(&self) -> DomainResult<CallPanelController> {
        let active = self.console.read().await.active_session_id.clone();
        let customer = match active {
            Some(id) => self
                .store
                .get_session_by_id(&id)
                .await?
                .map(|s| s.customer),
            None => None,
        };

        Ok(
            CallPanelController::open(customer, self.time.clone(), self.spawner.clone())
                .with_event_bus(self.event_bus.clone())
                .with_link_confirm_delay(self.call_link_confirm_delay),
        )
    }
}
