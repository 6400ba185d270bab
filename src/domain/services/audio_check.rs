use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioStatus {
    Unverified,
    Verifying,
    Ready,
    Failed,
}

/// Transient, user-visible notice keyed into the string table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioNotice {
    Verifying,
    Ready,
    Failed,
    Guide,
}

impl AudioNotice {
    pub fn message_key(&self) -> &'static str {
        match self {
            AudioNotice::Verifying => "toast_audio_verifying",
            AudioNotice::Ready => "toast_audio_success",
            AudioNotice::Failed => "toast_audio_failed",
            AudioNotice::Guide => "toast_audio_guide",
        }
    }
}

/// Audio device verification. Manual retries are unbounded; the passive
/// unlock on first interaction happens at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCheck {
    status: AudioStatus,
    unlock_attempted: bool,
}

impl AudioCheck {
    pub fn new() -> Self {
        Self {
            status: AudioStatus::Unverified,
            unlock_attempted: false,
        }
    }

    pub fn status(&self) -> AudioStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == AudioStatus::Ready
    }

    /// First user interaction. Returns the notice to show if this
    /// triggers the one-shot unlock attempt.
    pub fn on_first_interaction(&mut self) -> Option<AudioNotice> {
        if self.unlock_attempted || self.status != AudioStatus::Unverified {
            return None;
        }
        self.unlock_attempted = true;
        self.begin()
    }

    /// Manual verification request (also the retry path after failure)
    pub fn begin(&mut self) -> Option<AudioNotice> {
        match self.status {
            AudioStatus::Unverified | AudioStatus::Failed => {
                self.status = AudioStatus::Verifying;
                Some(AudioNotice::Verifying)
            }
            AudioStatus::Verifying | AudioStatus::Ready => None,
        }
    }

    pub fn complete(&mut self, ok: bool) -> Option<AudioNotice> {
        if self.status != AudioStatus::Verifying {
            return None;
        }
        if ok {
            self.status = AudioStatus::Ready;
            Some(AudioNotice::Ready)
        } else {
            self.status = AudioStatus::Failed;
            Some(AudioNotice::Failed)
        }
    }
}

impl Default for AudioCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_only_once() {
        let mut check = AudioCheck::new();
        assert_eq!(check.on_first_interaction(), Some(AudioNotice::Verifying));
        assert_eq!(check.complete(false), Some(AudioNotice::Failed));
        assert_eq!(check.on_first_interaction(), None);
        assert_eq!(check.status(), AudioStatus::Failed);
    }

    #[test]
    fn test_manual_retry_after_failure() {
        let mut check = AudioCheck::new();
        for _ in 0..3 {
            assert_eq!(check.begin(), Some(AudioNotice::Verifying));
            check.complete(false);
        }
        check.begin();
        assert_eq!(check.complete(true), Some(AudioNotice::Ready));
        assert!(check.is_ready());
        assert_eq!(check.begin(), None);
    }

    #[test]
    fn test_complete_without_begin_is_ignored() {
        let mut check = AudioCheck::new();
        assert_eq!(check.complete(true), None);
        assert_eq!(check.status(), AudioStatus::Unverified);
    }
}
