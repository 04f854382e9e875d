use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use super::{events::RoomEvent, notifier::Notifier};

/// Buffered events per channel before slow subscribers start lagging
const CHANNEL_CAPACITY: usize = 100;

/// In-process pub/sub bus for room events
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    /// channel name -> sender
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<RoomEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Emits an event to all subscribers of a channel
    pub async fn emit(&self, channel: &str, event: RoomEvent) {
        let sender = self.sender_for(channel).await;

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    channel = %channel,
                    receivers = receiver_count,
                    "Room event emitted"
                );
            }
            Err(_) => {
                debug!(channel = %channel, "Room event emitted with no receivers");
            }
        }
    }

    /// Subscribe to events on a channel
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<RoomEvent> {
        self.sender_for(channel).await.subscribe()
    }

    async fn sender_for(&self, channel: &str) -> broadcast::Sender<RoomEvent> {
        if let Some(sender) = self.channels.read().await.get(channel) {
            return sender.clone();
        }

        debug!(channel = %channel, "Creating new room channel");
        let mut channels = self.channels.write().await;
        channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait]
impl Notifier for EventBus {
    async fn publish(&self, channel: &str, event: RoomEvent) {
        info!(
            channel = %channel,
            event = event.name(),
            payload = %event.payload(),
            "Event triggered"
        );
        self.emit(channel, event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe("room-main-room").await;

        bus.publish("room-main-room", RoomEvent::GameStarting { timer_duration: 5 })
            .await;

        let event = receiver.recv().await.unwrap();
        assert_eq!(event, RoomEvent::GameStarting { timer_duration: 5 });
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let bus = EventBus::new();

        // Should not panic or block
        bus.publish("room-nobody", RoomEvent::GameStarting { timer_duration: 1 })
            .await;

        // A later subscriber only sees later events
        let mut receiver = bus.subscribe("room-nobody").await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_channels_are_isolated() {
        let bus = EventBus::new();
        let mut first = bus.subscribe("room-a").await;
        let mut second = bus.subscribe("room-b").await;

        bus.publish("room-a", RoomEvent::GameStarting { timer_duration: 2 })
            .await;

        assert!(first.recv().await.is_ok());
        assert!(second.try_recv().is_err());
    }
}
