// Library crate for the Odds game server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod room;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::{GameConfig, ServerConfig};
pub use event::{EventBus, Notifier, RoomEvent};
pub use room::{models::RoomModel, repository::RoomRepository, RoomService};
pub use shared::{AppError, AppState};
