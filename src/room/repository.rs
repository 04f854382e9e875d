use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument};

use super::models::{PlayerModel, RoomModel};
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Joined the room, either in a player slot or as a spectator
    Joined {
        room: RoomModel,
        player: PlayerModel,
        is_spectator: bool,
    },
    /// The generated id is already used by someone in the room
    IdTaken,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to leave a room
#[derive(Debug, Clone)]
pub enum LeaveRoomResult {
    /// Left the room, returns updated room data
    Left {
        room: RoomModel,
        /// Spectator moved into the freed slot, if any
        promoted: Option<PlayerModel>,
        /// Room fell back to `Waiting` because of the departure
        reopened: bool,
    },
    /// Id is neither a player nor a spectator
    PlayerNotInRoom,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to submit a number
#[derive(Debug, Clone)]
pub enum SubmitNumberResult {
    /// Number recorded; `completed` is true when this submission finished the game
    Recorded { room: RoomModel, completed: bool },
    /// Id is a spectator or unknown
    NotAPlayer,
    /// The game already has a result
    AlreadyCompleted,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room repository operations
///
/// Every mutating method is atomic: it either applies all of its changes or
/// none of them.
#[async_trait]
pub trait RoomRepository {
    /// Returns the room, creating an empty one on first access
    async fn find_or_create_room(&self, room_id: &str) -> Result<RoomModel, AppError>;

    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Atomically seats a player, or queues them as a spectator when the slots are taken
    async fn try_join_room(
        &self,
        room_id: &str,
        player: PlayerModel,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically removes a player or spectator, promoting the next spectator if a slot frees up
    async fn leave_room(&self, room_id: &str, player_id: &str)
        -> Result<LeaveRoomResult, AppError>;

    /// Atomically records a player's number and completes the game once both are in
    async fn submit_number(
        &self,
        room_id: &str,
        player_id: &str,
        number: u64,
    ) -> Result<SubmitNumberResult, AppError>;
}

/// In-memory implementation of RoomRepository
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<String, RoomModel>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    fn lock_rooms(&self) -> Result<MutexGuard<'_, HashMap<String, RoomModel>>, AppError> {
        self.rooms.lock().map_err(|_| {
            error!("Room store lock poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn find_or_create_room(&self, room_id: &str) -> Result<RoomModel, AppError> {
        let mut rooms = self.lock_rooms()?;

        let room = rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room_id = %room_id, "Creating room in memory");
            RoomModel::new(room_id.to_string())
        });

        Ok(room.clone())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        debug!(room_id = %room_id, "Fetching room from memory");

        let rooms = self.lock_rooms()?;
        let room = rooms.get(room_id).cloned();

        if room.is_none() {
            debug!(room_id = %room_id, "Room not found in memory");
        }

        Ok(room)
    }

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    async fn try_join_room(
        &self,
        room_id: &str,
        player: PlayerModel,
    ) -> Result<JoinRoomResult, AppError> {
        let mut rooms = self.lock_rooms()?;

        // Get the room or return RoomNotFound
        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        if room.has_member(&player.id) {
            debug!(room_id = %room_id, player_id = %player.id, "Player id already in use");
            return Ok(JoinRoomResult::IdTaken);
        }

        let is_spectator = room.seat(player.clone());

        info!(
            room_id = %room_id,
            player_id = %player.id,
            is_spectator = is_spectator,
            player_count = room.players.len(),
            spectator_count = room.spectators.len(),
            "Player joined room (atomic)"
        );

        Ok(JoinRoomResult::Joined {
            room: room.clone(),
            player,
            is_spectator,
        })
    }

    #[instrument(skip(self))]
    async fn leave_room(
        &self,
        room_id: &str,
        player_id: &str,
    ) -> Result<LeaveRoomResult, AppError> {
        let mut rooms = self.lock_rooms()?;

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(LeaveRoomResult::RoomNotFound);
            }
        };

        if let Some(index) = room.player_index(player_id) {
            room.players.remove(index);

            let promoted = room.promote_next_spectator();
            if let Some(promoted) = &promoted {
                info!(
                    room_id = %room_id,
                    promoted_id = %promoted.id,
                    "Spectator promoted to player"
                );
            }

            let reopened = room.reopen_if_unsettled();

            info!(
                room_id = %room_id,
                player_id = %player_id,
                player_count = room.players.len(),
                reopened = reopened,
                "Player left room (atomic)"
            );

            return Ok(LeaveRoomResult::Left {
                room: room.clone(),
                promoted,
                reopened,
            });
        }

        if let Some(index) = room.spectator_index(player_id) {
            room.spectators.remove(index);

            info!(
                room_id = %room_id,
                player_id = %player_id,
                spectator_count = room.spectators.len(),
                "Spectator left room (atomic)"
            );

            return Ok(LeaveRoomResult::Left {
                room: room.clone(),
                promoted: None,
                reopened: false,
            });
        }

        debug!(room_id = %room_id, player_id = %player_id, "Player not in room");
        Ok(LeaveRoomResult::PlayerNotInRoom)
    }

    #[instrument(skip(self))]
    async fn submit_number(
        &self,
        room_id: &str,
        player_id: &str,
        number: u64,
    ) -> Result<SubmitNumberResult, AppError> {
        let mut rooms = self.lock_rooms()?;

        let room = match rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(SubmitNumberResult::RoomNotFound);
            }
        };

        let index = match room.player_index(player_id) {
            Some(index) => index,
            None => {
                debug!(room_id = %room_id, player_id = %player_id, "Not an active player");
                return Ok(SubmitNumberResult::NotAPlayer);
            }
        };

        if room.is_completed() {
            debug!(room_id = %room_id, player_id = %player_id, "Game already completed");
            return Ok(SubmitNumberResult::AlreadyCompleted);
        }

        room.players[index].number = Some(number);
        let completed = room.settle();

        info!(
            room_id = %room_id,
            player_id = %player_id,
            completed = completed,
            "Number submitted (atomic)"
        );

        Ok(SubmitNumberResult::Recorded {
            room: room.clone(),
            completed,
        })
    }
}
