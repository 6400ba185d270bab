use crate::domain::ports::audio_probe::AudioProbe;
use crate::domain::services::{AudioCheck, AudioNotice, AudioStatus};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Runs audio device checks against a probe and reports notices
#[derive(Clone)]
pub struct AudioService {
    probe: Arc<dyn AudioProbe>,
    check: Arc<Mutex<AudioCheck>>,
}

impl AudioService {
    pub fn new(probe: Arc<dyn AudioProbe>) -> Self {
        Self {
            probe,
            check: Arc::new(Mutex::new(AudioCheck::new())),
        }
    }

    pub async fn status(&self) -> AudioStatus {
        self.check.lock().await.status()
    }

    /// Passive unlock on the first click/keypress of the session
    pub async fn on_first_interaction(&self) -> Vec<AudioNotice> {
        let started = self.check.lock().await.on_first_interaction();
        self.run(started).await
    }

    /// Verification requested from the toolbar
    pub async fn verify(&self) -> Vec<AudioNotice> {
        let started = self.check.lock().await.begin();
        self.run(started).await
    }

    async fn run(&self, started: Option<AudioNotice>) -> Vec<AudioNotice> {
        let Some(first) = started else {
            return Vec::new();
        };
        let mut notices = vec![first];

        let result = self.probe.probe().await;
        if let Err(e) = &result {
            tracing::warn!("Audio probe failed: {}", e);
        }

        if let Some(notice) = self.check.lock().await.complete(result.is_ok()) {
            notices.push(notice);
            if notice == AudioNotice::Failed {
                notices.push(AudioNotice::Guide);
            }
        }
        notices
    }
}
