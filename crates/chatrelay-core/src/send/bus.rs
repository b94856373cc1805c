//! Broadcast bus for send progress events.
//!
//! Built on `tokio::sync::broadcast`. Publishing with no active
//! subscribers is a no-op.

use tokio::sync::broadcast;

use super::state::SendEvent;

/// Multi-consumer event bus for [`SendEvent`]s.
///
/// Cloning the bus clones the sender, so the orchestrator and any number
/// of views can share one.
#[derive(Clone)]
pub struct SendEventBus {
    sender: broadcast::Sender<SendEvent>,
}

impl SendEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SendEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: SendEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for SendEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for SendEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendEventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_subscribe_delivers_event() {
        let bus = SendEventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(SendEvent::Refresh {
            chat_id: "c1".to_string(),
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            SendEvent::Refresh {
                chat_id: "c1".to_string()
            }
        );
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = SendEventBus::default();
        bus.publish(SendEvent::Refresh {
            chat_id: "c1".to_string(),
        });
    }

    #[tokio::test]
    async fn cloned_bus_shares_channel() {
        let bus = SendEventBus::new(8);
        let publisher = bus.clone();
        let mut rx = bus.subscribe();
        publisher.publish(SendEvent::Refresh {
            chat_id: "c2".to_string(),
        });
        assert!(matches!(rx.recv().await.unwrap(), SendEvent::Refresh { chat_id } if chat_id == "c2"));
    }
}
