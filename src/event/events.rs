use serde_json::{json, Value};
use strum_macros::IntoStaticStr;

use crate::room::models::RoomModel;

/// Events broadcast to everyone watching a room
///
/// Events represent facts about things that have already happened. Each one
/// carries the room state as it was right after the change, so subscribers
/// never need to query back.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RoomEvent {
    /// A player or spectator has left the room
    PlayerLeft {
        player_id: String,
        room_state: RoomModel,
    },

    /// A spectator has taken a free player slot
    PlayerPromoted {
        player_id: String,
        room_state: RoomModel,
    },

    /// A player has locked in a number
    NumberSubmitted {
        player_id: String,
        room_state: RoomModel,
    },

    /// Both numbers are in, the result will be revealed after `timer_duration` seconds
    GameStarting { timer_duration: u64 },

    /// The reveal delay elapsed
    GameResult { room_state: RoomModel },
}

impl RoomEvent {
    /// Wire name of the event, e.g. `player-left`
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// JSON payload sent alongside the event name
    pub fn payload(&self) -> Value {
        match self {
            RoomEvent::PlayerLeft {
                player_id,
                room_state,
            }
            | RoomEvent::PlayerPromoted {
                player_id,
                room_state,
            }
            | RoomEvent::NumberSubmitted {
                player_id,
                room_state,
            } => json!({ "playerId": player_id, "roomState": room_state }),
            RoomEvent::GameStarting { timer_duration } => {
                json!({ "timerDuration": timer_duration })
            }
            RoomEvent::GameResult { room_state } => json!({ "roomState": room_state }),
        }
    }
}

/// Pub/sub channel name for a room
pub fn room_channel(room_id: &str) -> String {
    format!("room-{}", room_id)
}
