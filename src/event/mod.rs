// Room event broadcasting
//
// The room service publishes through the `Notifier` seam; `EventBus` is the
// in-process implementation used by the server.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{room_channel, RoomEvent};
pub use notifier::Notifier;

// Internal modules
mod bus;
mod events;
mod notifier;
