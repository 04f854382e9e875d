// Public API - what other modules can use
pub use handlers::router;
pub use service::{JoinedRoom, LeftRoom, RoomService, SubmittedNumber};

// Internal modules
mod handlers;
pub mod generators;
pub mod models;
pub mod repository;
mod reveal;
mod service;
pub mod types;
