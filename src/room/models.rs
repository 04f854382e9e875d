use serde::{Deserialize, Serialize};

/// Id of the one room every client shares
pub const MAIN_ROOM_ID: &str = "main-room";

/// Number of active player slots in a room
pub const ROOM_CAPACITY: usize = 2;

/// A participant, either in a player slot or waiting as a spectator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: String,
    pub name: String,
    pub number: Option<u64>,
}

impl PlayerModel {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            number: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    // No transition enters this state
    Playing,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOutcome {
    OddsMet,
    OddsLost,
}

impl GameOutcome {
    pub fn from_numbers(first: u64, second: u64) -> Self {
        if first == second {
            GameOutcome::OddsMet
        } else {
            GameOutcome::OddsLost
        }
    }
}

/// In-memory room record
///
/// `result` is `Some` exactly when `status` is `Completed`, and completion
/// requires both player slots to hold a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,
    pub players: Vec<PlayerModel>,
    pub spectators: Vec<PlayerModel>,
    pub status: RoomStatus,
    pub result: Option<GameOutcome>,
}

impl RoomModel {
    /// Creates an empty room waiting for players
    pub fn new(id: String) -> Self {
        Self {
            id,
            players: Vec::new(),
            spectators: Vec::new(),
            status: RoomStatus::Waiting,
            result: None,
        }
    }

    /// Check if both player slots are taken
    pub fn is_full(&self) -> bool {
        self.players.len() >= ROOM_CAPACITY
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoomStatus::Completed
    }

    /// Check if an id belongs to anyone in the room, player or spectator
    pub fn has_member(&self, member_id: &str) -> bool {
        self.player_index(member_id).is_some() || self.spectator_index(member_id).is_some()
    }

    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn spectator_index(&self, player_id: &str) -> Option<usize> {
        self.spectators.iter().position(|p| p.id == player_id)
    }

    /// Seats a newcomer in a free player slot, or queues them as a spectator.
    /// Returns true when they ended up spectating.
    pub fn seat(&mut self, player: PlayerModel) -> bool {
        if self.is_full() {
            self.spectators.push(player);
            true
        } else {
            self.players.push(player);
            false
        }
    }

    /// Moves the longest-waiting spectator into a free player slot
    pub fn promote_next_spectator(&mut self) -> Option<PlayerModel> {
        if self.is_full() || self.spectators.is_empty() {
            return None;
        }
        let promoted = self.spectators.remove(0);
        self.players.push(promoted.clone());
        Some(promoted)
    }

    /// Both slots occupied and both numbers in
    pub fn all_numbers_submitted(&self) -> bool {
        self.players.len() == ROOM_CAPACITY && self.players.iter().all(|p| p.number.is_some())
    }

    /// Completes the game if every slot holds a number. Returns true on completion.
    pub fn settle(&mut self) -> bool {
        if !self.all_numbers_submitted() {
            return false;
        }
        let outcome = match (self.players[0].number, self.players[1].number) {
            (Some(first), Some(second)) => GameOutcome::from_numbers(first, second),
            _ => return false,
        };
        self.status = RoomStatus::Completed;
        self.result = Some(outcome);
        true
    }

    /// Drops back to `Waiting` and clears the result
    pub fn reset(&mut self) {
        self.status = RoomStatus::Waiting;
        self.result = None;
    }

    /// Re-checks completion after the player list shrank. A room with no players
    /// always resets; a completed room reopens when its slots no longer both
    /// hold a number. Returns true if the status changed back to `Waiting`.
    pub fn reopen_if_unsettled(&mut self) -> bool {
        let was_waiting = self.status == RoomStatus::Waiting;
        if self.players.is_empty() || (self.is_completed() && !self.all_numbers_submitted()) {
            self.reset();
            return !was_waiting;
        }
        false
    }
}
