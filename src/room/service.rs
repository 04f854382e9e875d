use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, instrument, warn};

use super::{
    generators::PlayerIdGenerator,
    models::{PlayerModel, RoomModel},
    repository::{JoinRoomResult, LeaveRoomResult, RoomRepository, SubmitNumberResult},
    reveal::RevealTimer,
};
use crate::{
    config::GameConfig,
    event::{room_channel, Notifier, RoomEvent},
    shared::AppError,
};

/// How many fresh ids to try before giving up on a join
const MAX_ID_ATTEMPTS: usize = 5;

/// Outcome of a successful join
#[derive(Debug, Clone)]
pub struct JoinedRoom {
    pub player: PlayerModel,
    pub room: RoomModel,
    pub is_spectator: bool,
}

/// Outcome of a successful leave
#[derive(Debug, Clone)]
pub struct LeftRoom {
    pub room: RoomModel,
    pub promoted: Option<PlayerModel>,
}

/// Outcome of a successful number submission
#[derive(Debug, Clone)]
pub struct SubmittedNumber {
    pub room: RoomModel,
    pub completed: bool,
}

/// Service owning the game room and its rules
///
/// Join, leave and submit run one at a time: each holds the reveal timer lock
/// for its whole read-modify-write plus the notifications it sends, so a later
/// call always sees the full effect of an earlier one and timer scheduling
/// can't race a room reset.
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    notifier: Arc<dyn Notifier>,
    id_generator: Arc<dyn PlayerIdGenerator>,
    config: GameConfig,
    reveal: AsyncMutex<RevealTimer>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        id_generator: Arc<dyn PlayerIdGenerator>,
        config: GameConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            id_generator,
            config,
            reveal: AsyncMutex::new(RevealTimer::new()),
        }
    }

    /// Id of the shared room
    pub fn room_id(&self) -> &str {
        &self.config.room_id
    }

    /// Returns the shared room, creating it on first access
    #[instrument(skip(self))]
    pub async fn current_room(&self) -> Result<RoomModel, AppError> {
        self.repository
            .find_or_create_room(&self.config.room_id)
            .await
    }

    /// Looks up a room by id. Only the shared room exists.
    #[instrument(skip(self))]
    pub async fn get_state(&self, room_id: &str) -> Result<RoomModel, AppError> {
        if room_id == self.config.room_id {
            return self.current_room().await;
        }

        debug!(room_id = %room_id, "Looking up non-default room");
        self.repository
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }

    /// Adds a newcomer to the shared room as a player, or as a spectator when both slots are taken
    #[instrument(skip(self))]
    pub async fn join(&self, name: &str) -> Result<JoinedRoom, AppError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected join without a name");
            return Err(AppError::InvalidInput("Name is required".to_string()));
        }

        let _reveal = self.reveal.lock().await;
        let room_id = self.config.room_id.as_str();
        self.repository.find_or_create_room(room_id).await?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let player = PlayerModel::new(self.id_generator.generate(), name.to_string());

            match self.repository.try_join_room(room_id, player).await? {
                JoinRoomResult::Joined {
                    room,
                    player,
                    is_spectator,
                } => {
                    info!(
                        room_id = %room_id,
                        player_id = %player.id,
                        player_name = %player.name,
                        is_spectator = is_spectator,
                        "Player joined room successfully"
                    );
                    return Ok(JoinedRoom {
                        player,
                        room,
                        is_spectator,
                    });
                }
                JoinRoomResult::IdTaken => {
                    debug!(attempt = attempt, "Generated player id already taken, retrying");
                }
                JoinRoomResult::RoomNotFound => {
                    return Err(AppError::NotFound("Room not found".to_string()));
                }
            }
        }

        error!(
            room_id = %room_id,
            attempts = MAX_ID_ATTEMPTS,
            "Could not generate a unique player id"
        );
        Err(AppError::Internal)
    }

    /// Removes a player or spectator, promoting the next spectator into a freed slot
    #[instrument(skip(self))]
    pub async fn leave(&self, room_id: &str, player_id: &str) -> Result<LeftRoom, AppError> {
        if player_id.is_empty() {
            return Err(AppError::InvalidInput("Player ID is required".to_string()));
        }

        let mut reveal = self.reveal.lock().await;

        let (room, promoted) = match self.repository.leave_room(room_id, player_id).await? {
            LeaveRoomResult::Left {
                room,
                promoted,
                reopened,
            } => {
                if reopened && reveal.cancel() {
                    info!(room_id = %room_id, "Room reopened, pending result reveal cancelled");
                }
                (room, promoted)
            }
            LeaveRoomResult::PlayerNotInRoom => {
                warn!(room_id = %room_id, player_id = %player_id, "Leave for unknown player");
                return Err(AppError::NotFound("Player not found".to_string()));
            }
            LeaveRoomResult::RoomNotFound => {
                return Err(AppError::NotFound("Room not found".to_string()));
            }
        };

        let channel = room_channel(room_id);
        if let Some(promoted) = &promoted {
            self.notifier
                .publish(
                    &channel,
                    RoomEvent::PlayerPromoted {
                        player_id: promoted.id.clone(),
                        room_state: room.clone(),
                    },
                )
                .await;
        }
        self.notifier
            .publish(
                &channel,
                RoomEvent::PlayerLeft {
                    player_id: player_id.to_string(),
                    room_state: room.clone(),
                },
            )
            .await;

        info!(
            room_id = %room_id,
            player_id = %player_id,
            promoted = ?promoted.as_ref().map(|p| p.id.as_str()),
            "Player left room successfully"
        );

        Ok(LeftRoom { room, promoted })
    }

    /// Records a player's number; the second number completes the game and starts the reveal countdown
    #[instrument(skip(self))]
    pub async fn submit_number(
        &self,
        room_id: &str,
        player_id: &str,
        number: u64,
    ) -> Result<SubmittedNumber, AppError> {
        if player_id.is_empty() {
            return Err(AppError::InvalidInput("Player ID is required".to_string()));
        }
        if number < 1 {
            return Err(AppError::InvalidInput("Valid number is required".to_string()));
        }

        let mut reveal = self.reveal.lock().await;

        let (room, completed) = match self
            .repository
            .submit_number(room_id, player_id, number)
            .await?
        {
            SubmitNumberResult::Recorded { room, completed } => (room, completed),
            SubmitNumberResult::NotAPlayer => {
                warn!(room_id = %room_id, player_id = %player_id, "Number from non-player rejected");
                return Err(AppError::NotAPlayer(
                    "Player not found or not an active player".to_string(),
                ));
            }
            SubmitNumberResult::AlreadyCompleted => {
                warn!(room_id = %room_id, player_id = %player_id, "Number after completion rejected");
                return Err(AppError::InvalidState("Game already completed".to_string()));
            }
            SubmitNumberResult::RoomNotFound => {
                return Err(AppError::NotFound("Room not found".to_string()));
            }
        };

        let channel = room_channel(room_id);
        self.notifier
            .publish(
                &channel,
                RoomEvent::NumberSubmitted {
                    player_id: player_id.to_string(),
                    room_state: room.clone(),
                },
            )
            .await;

        if completed {
            info!(
                room_id = %room_id,
                result = ?room.result,
                reveal_delay_secs = self.config.reveal_delay.as_secs(),
                "Both numbers in, starting reveal countdown"
            );
            self.notifier
                .publish(
                    &channel,
                    RoomEvent::GameStarting {
                        timer_duration: self.config.reveal_delay.as_secs(),
                    },
                )
                .await;
            reveal.schedule(self.config.reveal_delay, self.reveal_task(room_id));
        }

        Ok(SubmittedNumber { room, completed })
    }

    /// Whether a result broadcast is waiting to fire
    pub async fn has_pending_reveal(&self) -> bool {
        self.reveal.lock().await.is_pending()
    }

    /// Re-reads the room when the countdown ends and broadcasts the final state
    fn reveal_task(&self, room_id: &str) -> impl Future<Output = ()> + Send + 'static {
        let repository = Arc::clone(&self.repository);
        let notifier = Arc::clone(&self.notifier);
        let room_id = room_id.to_string();

        async move {
            match repository.get_room(&room_id).await {
                Ok(Some(room)) if room.is_completed() => {
                    info!(room_id = %room_id, result = ?room.result, "Revealing game result");
                    notifier
                        .publish(
                            &room_channel(&room_id),
                            RoomEvent::GameResult { room_state: room },
                        )
                        .await;
                }
                Ok(_) => {
                    debug!(room_id = %room_id, "Room no longer completed, skipping reveal");
                }
                Err(e) => {
                    error!(room_id = %room_id, error = %e, "Failed to read room for reveal");
                }
            }
        }
    }
}
