use crate::domain::errors::DomainResult;
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::{EventBus, EventStream};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

/// In-process event bus backed by a broadcast channel
#[derive(Clone)]
pub struct LocalEventBus {
    tx: broadcast::Sender<ConsoleEvent>,
}

impl LocalEventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventBus for LocalEventBus {
    fn publish(&self, event: ConsoleEvent) -> DomainResult<()> {
        // Nobody listening is not a failure
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("No active subscribers for event: {}", e);
        }
        Ok(())
    }

    fn subscribe(&self) -> EventStream {
        let rx = self.tx.subscribe();
        Box::pin(BroadcastStream::new(rx).map(|item| item.map_err(|e| e.to_string())))
    }
}

impl Default for LocalEventBus {
    fn default() -> Self {
        Self::new(1000) // Default capacity of 1000 events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::i18n::Language;

    #[test]
    fn test_event_bus_creation() {
        let bus = LocalEventBus::new(100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers_succeeds() {
        let bus = LocalEventBus::new(4);
        assert!(bus
            .publish(ConsoleEvent::LanguageChanged {
                language: Language::En
            })
            .is_ok());
    }

    #[tokio::test]
    async fn test_event_publish_subscribe() {
        let bus = LocalEventBus::new(100);
        let mut rx = bus.subscribe();

        bus.publish(ConsoleEvent::EndConfirmationTick {
            message_id: "msg-1".to_string(),
            seconds_left: 59,
        })
        .unwrap();

        let received = rx.next().await.unwrap().unwrap();
        match received {
            ConsoleEvent::EndConfirmationTick {
                message_id,
                seconds_left,
            } => {
                assert_eq!(message_id, "msg-1");
                assert_eq!(seconds_left, 59);
            }
            _ => panic!("Unexpected event type"),
        }
    }
}
