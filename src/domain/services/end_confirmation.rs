use crate::domain::entities::EndConfirmationStatus;
use thiserror::Error;

/// Seconds a card waits before auto-confirming
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: EndConfirmationStatus,
        to: EndConfirmationStatus,
    },
}

/// How a card left `pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTrigger {
    Manual,
    Timeout,
}

impl ResolutionTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionTrigger::Manual => "manual",
            ResolutionTrigger::Timeout => "timeout",
        }
    }
}

/// Validates if an end-confirmation transition is allowed.
/// Only `pending -> solved` and `pending -> unsolved` are.
pub fn validate_transition(
    from: EndConfirmationStatus,
    to: EndConfirmationStatus,
) -> Result<(), TransitionError> {
    use EndConfirmationStatus::*;

    match (from, to) {
        (Pending, Solved) | (Pending, Unsolved) => Ok(()),
        _ => Err(TransitionError::InvalidTransition { from, to }),
    }
}

/// Per-card countdown state. One instance per card; instances share nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndConfirmationCountdown {
    status: EndConfirmationStatus,
    seconds_left: u32,
}

impl EndConfirmationCountdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            status: EndConfirmationStatus::Pending,
            seconds_left: seconds,
        }
    }

    pub fn status(&self) -> EndConfirmationStatus {
        self.status
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// One second elapsed. Returns `Some(Solved)` on the tick that
    /// auto-resolves the card; terminal cards ignore ticks.
    pub fn tick(&mut self) -> Option<EndConfirmationStatus> {
        if self.status.is_terminal() {
            return None;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.status = EndConfirmationStatus::Solved;
            return Some(self.status);
        }
        None
    }

    pub fn resolve(&mut self, to: EndConfirmationStatus) -> Result<(), TransitionError> {
        validate_transition(self.status, to)?;
        self.status = to;
        Ok(())
    }
}

impl Default for EndConfirmationCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECONDS)
    }
}
