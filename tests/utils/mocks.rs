use async_trait::async_trait;
use tokio::sync::RwLock;

use odds::{Notifier, RoomEvent};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Notifier that keeps every published event in order
#[derive(Default)]
pub struct RecordingNotifier {
    published: RwLock<Vec<(String, RoomEvent)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<(String, RoomEvent)> {
        self.published.read().await.clone()
    }

    pub async fn event_names(&self) -> Vec<&'static str> {
        self.published
            .read()
            .await
            .iter()
            .map(|(_, event)| event.name())
            .collect()
    }

    #[allow(dead_code)]
    pub async fn clear(&self) {
        self.published.write().await.clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, channel: &str, event: RoomEvent) {
        self.published
            .write()
            .await
            .push((channel.to_string(), event));
    }
}
