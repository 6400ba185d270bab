use crate::domain::entities::Customer;
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::task_spawner::TaskSpawner;
use crate::domain::ports::time_service::TimeService;
use crate::domain::services::{CallPanel, CallStage};
use futures::FutureExt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_LINK_CONFIRM_DELAY: Duration = Duration::from_millis(500);

/// Drives one open dialer panel. Closing (dropping) the controller
/// cancels a pending link confirmation.
pub struct CallPanelController {
    panel: Arc<Mutex<CallPanel>>,
    time: Arc<dyn TimeService>,
    spawner: Arc<dyn TaskSpawner>,
    event_bus: Option<Arc<dyn EventBus>>,
    link_confirm_delay: Duration,
    shutdown: CancellationToken,
}

impl CallPanelController {
    pub fn open(
        context_customer: Option<Customer>,
        time: Arc<dyn TimeService>,
        spawner: Arc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            panel: Arc::new(Mutex::new(CallPanel::open(context_customer))),
            time,
            spawner,
            event_bus: None,
            link_confirm_delay: DEFAULT_LINK_CONFIRM_DELAY,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_link_confirm_delay(mut self, delay: Duration) -> Self {
        self.link_confirm_delay = delay;
        self
    }

    /// Copy of the current panel state
    pub fn snapshot(&self) -> CallPanel {
        self.lock().clone()
    }

    pub fn stage(&self) -> CallStage {
        self.lock().stage()
    }

    pub fn number(&self) -> String {
        self.lock().number().to_string()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    pub fn set_number(&self, input: &str) -> bool {
        self.lock().set_number(input)
    }

    pub fn press_key(&self, key: char) -> bool {
        self.lock().press_key(key)
    }

    pub fn backspace(&self) -> bool {
        self.lock().backspace()
    }

    pub fn clear_association(&self) -> bool {
        self.lock().clear_association()
    }

    pub fn start_call(&self) -> bool {
        let (started, number) = {
            let mut panel = self.lock();
            (panel.start_call(), panel.number().to_string())
        };
        if started {
            self.stage_changed(CallStage::Idle, CallStage::Calling, number);
        }
        started
    }

    pub fn end_call(&self) -> Option<CallStage> {
        let (next, number) = {
            let mut panel = self.lock();
            (panel.end_call(), panel.number().to_string())
        };
        if let Some(to) = next {
            self.stage_changed(CallStage::Calling, to, number);
        }
        next
    }

    /// Call button / Enter key
    pub fn toggle_call(&self) -> CallStage {
        match self.stage() {
            CallStage::Idle => {
                self.start_call();
            }
            CallStage::Calling => {
                self.end_call();
            }
            CallStage::PostCall => {}
        }
        self.stage()
    }

    /// Link a customer after an unlinked call. The panel closes once the
    /// confirmation delay has passed.
    pub fn link_customer(&self, customer: Customer) -> bool {
        let customer_id = customer.id.clone();
        let (linked, number) = {
            let mut panel = self.lock();
            (panel.link_customer(customer), panel.number().to_string())
        };
        if !linked {
            return false;
        }

        tracing::info!("Call to {} linked to customer {}", number, customer_id);

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::CallCustomerLinked {
                customer_id,
                number: number.clone(),
            });
        }

        let panel = self.panel.clone();
        let time = self.time.clone();
        let bus = self.event_bus.clone();
        let token = self.shutdown.clone();
        let delay = self.link_confirm_delay;

        self.spawner.spawn(
            async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Call panel closed before link confirmation");
                        return;
                    }
                    _ = time.sleep(delay) => {}
                }

                let confirmed = {
                    let mut panel = panel.lock().unwrap_or_else(|e| e.into_inner());
                    panel.confirm_link()
                };
                if confirmed {
                    if let Some(bus) = bus {
                        let _ = bus.publish(ConsoleEvent::CallStageChanged {
                            from: CallStage::PostCall,
                            to: CallStage::Idle,
                            number,
                        });
                    }
                }
            }
            .boxed(),
        );

        true
    }

    pub fn skip(&self) -> bool {
        let (skipped, number) = {
            let mut panel = self.lock();
            (panel.skip(), panel.number().to_string())
        };
        if skipped {
            self.stage_changed(CallStage::PostCall, CallStage::Idle, number);
        }
        skipped
    }

    fn stage_changed(&self, from: CallStage, to: CallStage, number: String) {
        tracing::info!("Call stage {} -> {} ({})", from, to, number);
        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::CallStageChanged { from, to, number });
        }
    }

    fn lock(&self) -> MutexGuard<'_, CallPanel> {
        self.panel.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for CallPanelController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
