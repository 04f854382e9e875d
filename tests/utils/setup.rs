use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use odds::{
    config::GameConfig,
    room::{self, generators::RandomPlayerIdGenerator, repository::InMemoryRoomRepository},
    AppState, RoomService,
};

use super::mocks::RecordingNotifier;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub room_service: Arc<RoomService>,
    pub notifier: Arc<RecordingNotifier>,
}

pub struct TestSetupBuilder {
    reveal_delay: Duration,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            reveal_delay: Duration::from_millis(20),
        }
    }

    #[allow(dead_code)]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn build(self) -> TestSetup {
        let notifier = Arc::new(RecordingNotifier::new());
        let room_service = Arc::new(RoomService::new(
            Arc::new(InMemoryRoomRepository::new()),
            notifier.clone(),
            Arc::new(RandomPlayerIdGenerator::new()),
            GameConfig {
                reveal_delay: self.reveal_delay,
                ..GameConfig::default()
            },
        ));

        let app = room::router().with_state(AppState::new(room_service.clone()));

        TestSetup {
            app,
            room_service,
            notifier,
        }
    }
}
