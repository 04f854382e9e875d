use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::types::{
    parse_body, JoinRoomRequest, JoinRoomResponse, LeaveRoomRequest, RoomActionResponse,
    RoomStateResponse, SubmitNumberRequest, SuccessResponse,
};
use crate::shared::{AppError, AppState};

/// Routes for the shared room and the id-addressed room endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/room",
            get(get_room)
                .post(join_room)
                .delete(leave_room)
                .patch(submit_number),
        )
        .route("/room/:id", get(get_room_by_id))
        .route("/room/:id/leave", post(leave_room_by_id))
        .route("/room/:id/number", post(submit_number_by_id))
}

/// GET /room
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(State(state): State<AppState>) -> Result<Json<RoomStateResponse>, AppError> {
    let room = state.room_service.current_room().await?;
    Ok(Json(RoomStateResponse { room_state: room }))
}

/// HTTP handler for joining the shared room
///
/// POST /room
/// Seats the caller as a player, or as a spectator when both slots are taken
#[instrument(name = "join_room", skip(state, body))]
pub async fn join_room(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<JoinRoomResponse>, AppError> {
    let name = parse_body::<JoinRoomRequest>(&body)?.name()?;
    let joined = state.room_service.join(&name).await?;

    info!(
        player_id = %joined.player.id,
        is_spectator = joined.is_spectator,
        "Join request completed"
    );

    Ok(Json(JoinRoomResponse {
        room_id: joined.room.id.clone(),
        player_id: joined.player.id,
        room_state: joined.room,
        is_spectator: joined.is_spectator,
    }))
}

/// DELETE /room
#[instrument(name = "leave_room", skip(state, body))]
pub async fn leave_room(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<RoomActionResponse>, AppError> {
    let player_id = parse_body::<LeaveRoomRequest>(&body)?.player_id()?;
    let room_id = state.room_service.room_id().to_string();
    let left = state.room_service.leave(&room_id, &player_id).await?;

    Ok(Json(RoomActionResponse {
        success: true,
        room_state: left.room,
    }))
}

/// PATCH /room
#[instrument(name = "submit_number", skip(state, body))]
pub async fn submit_number(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<RoomActionResponse>, AppError> {
    let (player_id, number) = parse_body::<SubmitNumberRequest>(&body)?.validated()?;
    let room_id = state.room_service.room_id().to_string();
    let submitted = state
        .room_service
        .submit_number(&room_id, &player_id, number)
        .await?;

    Ok(Json(RoomActionResponse {
        success: true,
        room_state: submitted.room,
    }))
}

/// GET /room/:id
#[instrument(name = "get_room_by_id", skip(state))]
pub async fn get_room_by_id(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomStateResponse>, AppError> {
    let room = state.room_service.get_state(&room_id).await?;
    Ok(Json(RoomStateResponse { room_state: room }))
}

/// HTTP handler for leaving a room by id
///
/// POST /room/:id/leave
/// Accepts JSON or a text/plain body holding JSON, as sent by `navigator.sendBeacon`
#[instrument(name = "leave_room_by_id", skip(state, body))]
pub async fn leave_room_by_id(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    body: String,
) -> Result<Json<SuccessResponse>, AppError> {
    let player_id = parse_body::<LeaveRoomRequest>(&body)?.player_id()?;
    state.room_service.leave(&room_id, &player_id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /room/:id/number
#[instrument(name = "submit_number_by_id", skip(state, body))]
pub async fn submit_number_by_id(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    body: String,
) -> Result<Json<RoomActionResponse>, AppError> {
    let (player_id, number) = parse_body::<SubmitNumberRequest>(&body)?.validated()?;
    let submitted = state
        .room_service
        .submit_number(&room_id, &player_id, number)
        .await
        .map_err(|e| match e {
            // This route reports spectators and strangers as bad input
            AppError::NotAPlayer(_) => AppError::InvalidInput(
                "You are not an active player in this game".to_string(),
            ),
            other => other,
        })?;

    Ok(Json(RoomActionResponse {
        success: true,
        room_state: submitted.room,
    }))
}
