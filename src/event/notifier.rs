use async_trait::async_trait;

use super::events::RoomEvent;

/// Outbound seam for room events
///
/// Publishing is fire-and-forget: implementations must not fail the
/// operation that triggered the event, and delivery is best effort.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, channel: &str, event: RoomEvent);
}
