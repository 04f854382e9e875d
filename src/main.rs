use odds::{
    config::ServerConfig,
    event::EventBus,
    room::{self, generators::RandomPlayerIdGenerator, repository::InMemoryRoomRepository},
    AppState, RoomService,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odds=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    info!(
        room_id = %config.game.room_id,
        reveal_delay_secs = config.game.reveal_delay.as_secs(),
        "Starting Odds game server"
    );

    // One room service for the whole process, shared by every handler
    let room_service = Arc::new(RoomService::new(
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(EventBus::new()),
        Arc::new(RandomPlayerIdGenerator::new()),
        config.game.clone(),
    ));
    let app_state = AppState::new(room_service);

    let app = room::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await
}
