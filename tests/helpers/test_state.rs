#![allow(dead_code)]
use async_trait::async_trait;
use devpilot_console::application::services::{EndConfirmationService, MessageService};
use devpilot_console::application::AppState;
use devpilot_console::bootstrap::build_app_state_with_probe;
use devpilot_console::config::Config;
use devpilot_console::domain::ports::audio_probe::AudioProbe;
use devpilot_console::domain::ports::message_repository::MessageRepository;
use devpilot_console::domain::ports::session_repository::SessionRepository;
use devpilot_console::domain::ports::task_spawner::TaskSpawner;
use devpilot_console::domain::ports::time_service::TimeService;
use devpilot_console::infrastructure::persistence::MemoryStore;
use devpilot_console::infrastructure::runtime::tokio::{TokioTaskSpawner, TokioTimeService};
use devpilot_console::infrastructure::seed::mock_dataset;
use devpilot_console::shared::i18n::Language;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn test_config() -> Config {
    Config {
        language: Language::En,
        ..Config::default()
    }
}

pub async fn setup_test_state() -> AppState {
    setup_test_state_with_probe(Arc::new(FakeAudioProbe::new(true))).await
}

pub async fn setup_test_state_with_probe(probe: Arc<dyn AudioProbe>) -> AppState {
    build_app_state_with_probe(&test_config(), probe)
        .await
        .expect("Failed to build app state")
}

/// Seeded store plus message services wired to tokio time
pub fn setup_message_services() -> (MemoryStore, MessageService, EndConfirmationService) {
    let store = MemoryStore::from_dataset(&mock_dataset(Language::En, Utc::now()));
    let message_repo = Arc::new(store.clone()) as Arc<dyn MessageRepository>;
    let session_repo = Arc::new(store.clone()) as Arc<dyn SessionRepository>;
    let time = Arc::new(TokioTimeService::new()) as Arc<dyn TimeService>;
    let spawner = Arc::new(TokioTaskSpawner::new()) as Arc<dyn TaskSpawner>;

    let messages = MessageService::new(message_repo.clone(), session_repo.clone());
    let end_confirmation = EndConfirmationService::new(message_repo, session_repo, time, spawner);
    (store, messages, end_confirmation)
}

/// Probe with a switchable outcome and no delay
pub struct FakeAudioProbe {
    available: AtomicBool,
}

impl FakeAudioProbe {
    pub fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioProbe for FakeAudioProbe {
    async fn probe(&self) -> Result<(), String> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err("NotAllowedError".to_string())
        }
    }
}
