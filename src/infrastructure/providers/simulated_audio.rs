use crate::domain::ports::audio_probe::AudioProbe;
use crate::domain::ports::time_service::TimeService;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Stand-in for device playback: waits briefly, then reports the
/// configured outcome. The outcome can be flipped to exercise retries.
pub struct SimulatedAudioProbe {
    time: Arc<dyn TimeService>,
    available: AtomicBool,
    latency: Duration,
}

impl SimulatedAudioProbe {
    pub fn new(time: Arc<dyn TimeService>, available: bool) -> Self {
        Self {
            time,
            available: AtomicBool::new(available),
            latency: Duration::from_millis(300),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioProbe for SimulatedAudioProbe {
    async fn probe(&self) -> Result<(), String> {
        self.time.sleep(self.latency).await;
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err("Audio playback was blocked".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoWait;

    #[async_trait]
    impl TimeService for NoWait {
        async fn sleep(&self, _duration: Duration) {}
    }

    #[test]
    fn test_probe_follows_availability() {
        let probe = SimulatedAudioProbe::new(Arc::new(NoWait), false);
        assert!(tokio_test::block_on(probe.probe()).is_err());
        probe.set_available(true);
        assert!(tokio_test::block_on(probe.probe()).is_ok());
    }
}
