use crate::domain::entities::{EndConfirmationStatus, Message, MessageKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::message_repository::MessageRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use crate::domain::services::{
    EndConfirmationCountdown, ResolutionTrigger, DEFAULT_COUNTDOWN_SECONDS,
};
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const END_SESSION_REQUEST: &str = "System: End Session Request";

/// Owns one card's countdown. Dropping the handle cancels the countdown,
/// so a torn-down view never receives a late transition.
pub struct CountdownHandle {
    message_id: String,
    token: CancellationToken,
    active: ActiveCountdowns,
}

impl std::fmt::Debug for CountdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownHandle")
            .field("message_id", &self.message_id)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

impl CountdownHandle {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.token.cancel();
        forget_cancelled(&self.active, &self.message_id);
    }
}

type ActiveCountdowns = Arc<Mutex<HashMap<String, CancellationToken>>>;

/// Drop the entry for `message_id` unless a newer countdown replaced it
fn forget_cancelled(active: &ActiveCountdowns, message_id: &str) {
    let mut active = active.lock().unwrap_or_else(|e| e.into_inner());
    if active.get(message_id).is_some_and(|t| t.is_cancelled()) {
        active.remove(message_id);
    }
}

/// Runs end-of-session confirmation cards and is the only writer of
/// their status.
#[derive(Clone)]
pub struct EndConfirmationService {
    message_repo: Arc<dyn MessageRepository>,
    session_repo: Arc<dyn SessionRepository>,
    time: Arc<dyn TimeService>,
    spawner: Arc<dyn TaskSpawner>,
    event_bus: Option<Arc<dyn EventBus>>,
    countdown_seconds: u32,
    active: ActiveCountdowns,
}

impl EndConfirmationService {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        session_repo: Arc<dyn SessionRepository>,
        time: Arc<dyn TimeService>,
        spawner: Arc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            message_repo,
            session_repo,
            time,
            spawner,
            event_bus: None,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_countdown_seconds(mut self, seconds: u32) -> Self {
        self.countdown_seconds = seconds;
        self
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Post a pending card into the session and arm its countdown
    pub async fn request_end_session(
        &self,
        session_id: &str,
        sender_id: &str,
    ) -> DomainResult<(Message, CountdownHandle)> {
        self.session_repo
            .get_session_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Session {} not found", session_id)))?;

        let card = Message::new(
            session_id,
            sender_id,
            END_SESSION_REQUEST,
            MessageKind::EndConfirmation {
                status: EndConfirmationStatus::Pending,
            },
        );
        self.message_repo.create_message(&card).await?;

        tracing::info!(
            "End-confirmation card {} posted to session {}",
            card.id,
            session_id
        );

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::MessageSent {
                message_id: card.id.clone(),
                session_id: card.session_id.clone(),
                sender_id: card.sender_id.clone(),
                kind: card.kind.as_str(),
                timestamp: card.timestamp.to_rfc3339(),
            });
        }

        let handle = self.watch(&card.id).await?;
        Ok((card, handle))
    }

    /// Arm the countdown for an existing pending card
    pub async fn watch(&self, message_id: &str) -> DomainResult<CountdownHandle> {
        let message = self
            .message_repo
            .get_message_by_id(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Message {} not found", message_id)))?;

        match message.end_confirmation_status() {
            None => {
                return Err(DomainError::ValidationError(format!(
                    "Message {} is not an end-confirmation card",
                    message_id
                )))
            }
            Some(status) if status.is_terminal() => {
                return Err(DomainError::Conflict(format!(
                    "Card {} is already {}",
                    message_id, status
                )))
            }
            Some(_) => {}
        }

        let token = CancellationToken::new();
        {
            let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
            if active.get(message_id).is_some_and(|t| !t.is_cancelled()) {
                return Err(DomainError::Conflict(format!(
                    "Card {} already has a running countdown",
                    message_id
                )));
            }
            active.insert(message_id.to_string(), token.clone());
        }

        let service = self.clone();
        let id = message_id.to_string();
        let task_token = token.clone();
        self.spawner
            .spawn(async move { service.run_countdown(id, task_token).await }.boxed());

        tracing::debug!(
            "Countdown armed for card {} ({}s)",
            message_id,
            self.countdown_seconds
        );

        Ok(CountdownHandle {
            message_id: message_id.to_string(),
            token,
            active: self.active.clone(),
        })
    }

    /// Operator/customer pressed Solved or Not Solved
    pub async fn resolve(
        &self,
        message_id: &str,
        status: EndConfirmationStatus,
    ) -> DomainResult<Message> {
        self.stop_countdown(message_id);
        self.apply(message_id, status, ResolutionTrigger::Manual)
            .await
    }

    pub async fn status(&self, message_id: &str) -> DomainResult<EndConfirmationStatus> {
        self.message_repo
            .get_message_by_id(message_id)
            .await?
            .and_then(|m| m.end_confirmation_status())
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", message_id)))
    }

    pub fn has_running_countdown(&self, message_id: &str) -> bool {
        let active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.get(message_id).is_some_and(|t| !t.is_cancelled())
    }

    /// Cards whose countdown is still tracked
    pub fn tracked_countdowns(&self) -> usize {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn stop_countdown(&self, message_id: &str) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = active.remove(message_id) {
            token.cancel();
        }
    }

    async fn apply(
        &self,
        message_id: &str,
        status: EndConfirmationStatus,
        trigger: ResolutionTrigger,
    ) -> DomainResult<Message> {
        let message = self
            .message_repo
            .update_end_confirmation_status(message_id, status)
            .await?;

        tracing::info!(
            "End-confirmation card {} resolved as {} ({})",
            message_id,
            status,
            trigger.as_str()
        );

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::EndConfirmationResolved {
                message_id: message.id.clone(),
                session_id: message.session_id.clone(),
                status,
                trigger: trigger.as_str(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            });
        }

        Ok(message)
    }

    async fn run_countdown(self, message_id: String, token: CancellationToken) {
        let mut card = EndConfirmationCountdown::new(self.countdown_seconds);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Countdown for card {} cancelled", message_id);
                    forget_cancelled(&self.active, &message_id);
                    return;
                }
                _ = self.time.sleep(Duration::from_secs(1)) => {}
            }

            if token.is_cancelled() {
                forget_cancelled(&self.active, &message_id);
                return;
            }

            let expired = card.tick();

            if let Some(bus) = &self.event_bus {
                let _ = bus.publish(ConsoleEvent::EndConfirmationTick {
                    message_id: message_id.clone(),
                    seconds_left: card.seconds_left(),
                });
            }

            if let Some(status) = expired {
                {
                    let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
                    active.remove(&message_id);
                }
                match self.apply(&message_id, status, ResolutionTrigger::Timeout).await {
                    Ok(_) => {}
                    Err(DomainError::Conflict(reason)) => {
                        tracing::debug!("Card {} resolved before expiry: {}", message_id, reason);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to auto-resolve card {}: {}", message_id, e);
                    }
                }
                return;
            }
        }
    }
}
