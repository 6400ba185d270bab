use crate::application::services::*;
use crate::application::{AppState, ConsoleState};
use crate::config::Config;
use crate::domain::ports::audio_probe::AudioProbe;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::message_repository::MessageRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::ticket_repository::TicketRepository;
use crate::domain::ports::time_service::TimeService;
use crate::infrastructure::persistence::MemoryStore;
use crate::infrastructure::providers::SimulatedAudioProbe;
use crate::infrastructure::runtime::tokio::{TokioTaskSpawner, TokioTimeService};
use crate::infrastructure::seed::mock_dataset;
use crate::LocalEventBus;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub async fn build_app_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let time = Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>;
    let audio_probe =
        Arc::new(SimulatedAudioProbe::new(time.clone(), true)) as Arc<dyn AudioProbe>;
    assemble(config, time, audio_probe).await
}

/// Same as [`build_app_state`] with a caller-supplied audio probe
pub async fn build_app_state_with_probe(
    config: &Config,
    audio_probe: Arc<dyn AudioProbe>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let time = Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>;
    assemble(config, time, audio_probe).await
}

async fn assemble(
    config: &Config,
    time: Arc<dyn TimeService>,
    audio_probe: Arc<dyn AudioProbe>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    // Initialize runtime adapters
    let spawner = Arc::new(TokioTaskSpawner::new()) as Arc<dyn TaskSpawner>;

    let event_bus = Arc::new(LocalEventBus::new(config.event_bus_capacity)) as Arc<dyn EventBus>;
    tracing::info!(
        "Event bus initialized with capacity {}",
        config.event_bus_capacity
    );

    // Seed the in-memory store
    let dataset = mock_dataset(config.language, Utc::now());
    let store = MemoryStore::from_dataset(&dataset);
    tracing::info!(
        "Seeded {} sessions and {} tickets ({})",
        dataset.sessions.len(),
        dataset.tickets.len(),
        config.language
    );

    let message_repo = Arc::new(store.clone()) as Arc<dyn MessageRepository>;
    let session_repo = Arc::new(store.clone()) as Arc<dyn SessionRepository>;
    let ticket_repo = Arc::new(store.clone()) as Arc<dyn TicketRepository>;

    let ticket_service =
        TicketService::new(ticket_repo, session_repo.clone()).with_event_bus(event_bus.clone());
    let message_service = MessageService::new(message_repo.clone(), session_repo.clone())
        .with_event_bus(event_bus.clone());
    let end_confirmation_service =
        EndConfirmationService::new(message_repo, session_repo, time.clone(), spawner.clone())
            .with_event_bus(event_bus.clone())
            .with_countdown_seconds(config.end_confirmation_seconds);
    let audio_service = AudioService::new(audio_probe);
    tracing::info!(
        "End-confirmation countdown set to {}s",
        config.end_confirmation_seconds
    );

    let console = ConsoleState::new(dataset.current_user.clone(), config.language);

    Ok(AppState {
        store,
        event_bus,
        time,
        spawner,
        ticket_service,
        message_service,
        end_confirmation_service,
        audio_service,
        call_link_confirm_delay: Duration::from_millis(config.call_link_confirm_ms),
        console: Arc::new(RwLock::new(console)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{AudioNotice, AudioStatus};

    #[tokio::test(start_paused = true)]
    async fn test_default_state_verifies_audio_on_shared_clock() {
        let state = build_app_state(&Config::default()).await.unwrap();

        assert_eq!(
            state.audio_service.verify().await,
            vec![AudioNotice::Verifying, AudioNotice::Ready]
        );
        assert_eq!(state.audio_service.status().await, AudioStatus::Ready);
        assert_eq!(state.end_confirmation_service.tracked_countdowns(), 0);
    }
}
