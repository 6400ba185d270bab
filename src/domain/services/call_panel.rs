//! Outbound dialer state: `idle -> calling -> {idle, post_call}`,
//! `post_call -> idle`.
//!
//! Invalid input and out-of-stage actions are silent no-ops; every
//! mutator reports whether it changed anything.

use crate::domain::entities::Customer;
use crate::shared::utils::dial_input::{is_keypad_key, is_valid_dial_input, normalize_phone};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStage {
    Idle,
    Calling,
    PostCall,
}

impl fmt::Display for CallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallStage::Idle => write!(f, "idle"),
            CallStage::Calling => write!(f, "calling"),
            CallStage::PostCall => write!(f, "post_call"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallPanel {
    number: String,
    stage: CallStage,
    associated: Option<Customer>,
    context_customer: Option<Customer>,
    linked_at_dial: bool,
    awaiting_link_confirmation: bool,
    closed: bool,
}

impl CallPanel {
    /// Open the dialer. A context customer is pre-associated and its phone
    /// pre-fills the number.
    pub fn open(context_customer: Option<Customer>) -> Self {
        let number = context_customer
            .as_ref()
            .filter(|c| !c.phone.is_empty())
            .map(|c| normalize_phone(&c.phone))
            .unwrap_or_default();

        Self {
            number,
            stage: CallStage::Idle,
            associated: context_customer.clone(),
            context_customer,
            linked_at_dial: false,
            awaiting_link_confirmation: false,
            closed: false,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn stage(&self) -> CallStage {
        self.stage
    }

    pub fn associated_customer(&self) -> Option<&Customer> {
        self.associated.as_ref()
    }

    /// Whether a customer was linked when the current/last call started
    pub fn linked_at_dial(&self) -> bool {
        self.linked_at_dial
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_awaiting_link_confirmation(&self) -> bool {
        self.awaiting_link_confirmation
    }

    /// Customers offered for retroactive linking
    pub fn link_candidates(&self) -> Vec<&Customer> {
        self.context_customer.iter().collect()
    }

    /// Replace the number with typed text; rejected if any character is
    /// not dialable.
    pub fn set_number(&mut self, input: &str) -> bool {
        if self.stage != CallStage::Idle || !is_valid_dial_input(input) {
            return false;
        }
        self.number = input.to_string();
        true
    }

    pub fn press_key(&mut self, key: char) -> bool {
        if self.stage != CallStage::Idle || !is_keypad_key(key) {
            return false;
        }
        self.number.push(key);
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.stage != CallStage::Idle {
            return false;
        }
        self.number.pop().is_some()
    }

    /// `idle -> calling`; an empty number leaves the stage unchanged.
    pub fn start_call(&mut self) -> bool {
        if self.stage != CallStage::Idle || self.number.is_empty() {
            return false;
        }
        self.linked_at_dial = self.associated.is_some();
        self.stage = CallStage::Calling;
        true
    }

    /// Hang up. Linked calls close the panel; unlinked calls go to
    /// `post_call`. Returns the new stage, or `None` if not calling.
    pub fn end_call(&mut self) -> Option<CallStage> {
        if self.stage != CallStage::Calling {
            return None;
        }
        if self.associated.is_some() {
            self.stage = CallStage::Idle;
            self.closed = true;
        } else {
            self.stage = CallStage::PostCall;
        }
        Some(self.stage)
    }

    /// Call button / Enter key: start when idle, hang up when calling.
    pub fn toggle_call(&mut self) -> CallStage {
        match self.stage {
            CallStage::Idle => {
                self.start_call();
            }
            CallStage::Calling => {
                self.end_call();
            }
            CallStage::PostCall => {}
        }
        self.stage
    }

    /// Unlink the customer without touching the call stage
    pub fn clear_association(&mut self) -> bool {
        if self.stage == CallStage::PostCall || self.associated.is_none() {
            return false;
        }
        self.associated = None;
        true
    }

    /// Pick a customer in `post_call`. The panel stays in `post_call`
    /// until `confirm_link` runs after the confirmation delay.
    pub fn link_customer(&mut self, customer: Customer) -> bool {
        if self.stage != CallStage::PostCall || self.awaiting_link_confirmation {
            return false;
        }
        self.associated = Some(customer);
        self.awaiting_link_confirmation = true;
        true
    }

    pub fn confirm_link(&mut self) -> bool {
        if self.stage != CallStage::PostCall || !self.awaiting_link_confirmation {
            return false;
        }
        self.awaiting_link_confirmation = false;
        self.stage = CallStage::Idle;
        self.closed = true;
        true
    }

    /// Leave `post_call` without linking
    pub fn skip(&mut self) -> bool {
        if self.stage != CallStage::PostCall {
            return false;
        }
        self.awaiting_link_confirmation = false;
        self.stage = CallStage::Idle;
        self.closed = true;
        true
    }
}
