use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::models::RoomModel;
use crate::shared::AppError;

/// Request payload for joining the room
#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    pub name: Option<String>,
}

impl JoinRoomRequest {
    pub fn name(self) -> Result<String, AppError> {
        self.name
            .ok_or_else(|| AppError::InvalidInput("Name is required".to_string()))
    }
}

/// Request payload identifying a player, used for leaving
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomRequest {
    pub player_id: Option<String>,
}

impl LeaveRoomRequest {
    pub fn player_id(self) -> Result<String, AppError> {
        required_player_id(self.player_id)
    }
}

/// Request payload for submitting a number
///
/// `number` is kept as a raw JSON number so that floats and negatives can be
/// reported as bad input instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitNumberRequest {
    pub player_id: Option<String>,
    pub number: Option<serde_json::Number>,
}

impl SubmitNumberRequest {
    /// Returns the player id and a number that is a positive integer
    pub fn validated(self) -> Result<(String, u64), AppError> {
        let player_id = required_player_id(self.player_id)?;
        let number = self
            .number
            .and_then(|n| n.as_u64())
            .filter(|n| *n >= 1)
            .ok_or_else(|| AppError::InvalidInput("Valid number is required".to_string()))?;
        Ok((player_id, number))
    }
}

fn required_player_id(player_id: Option<String>) -> Result<String, AppError> {
    player_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Player ID is required".to_string()))
}

/// Parses a JSON request body regardless of its content type
///
/// Browsers sending a beacon on page unload post `text/plain`, so the body
/// is read as text and parsed here rather than through the `Json` extractor.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "Failed to parse request body");
        AppError::InvalidInput("Invalid JSON in request body".to_string())
    })
}

/// Response carrying only the room state
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateResponse {
    pub room_state: RoomModel,
}

/// Response for joining the room
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub room_id: String,
    pub player_id: String,
    pub room_state: RoomModel,
    pub is_spectator: bool,
}

/// Response for leave and submit on the shared room
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomActionResponse {
    pub success: bool,
    pub room_state: RoomModel,
}

/// Bare acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
