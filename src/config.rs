use std::time::Duration;

use crate::room::models::MAIN_ROOM_ID;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_REVEAL_DELAY_SECS: u64 = 5;

/// Settings for the single game room
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub room_id: String,
    /// How long to wait after both numbers are in before broadcasting the result
    pub reveal_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            room_id: MAIN_ROOM_ID.to_string(),
            reveal_delay: Duration::from_secs(DEFAULT_REVEAL_DELAY_SECS),
        }
    }
}

/// Process-level configuration read once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub game: GameConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("ODDS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        // Allow tuning the reveal countdown, default to 5 seconds
        let reveal_delay_secs = std::env::var("ODDS_REVEAL_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REVEAL_DELAY_SECS);

        Self {
            bind_addr,
            game: GameConfig {
                reveal_delay: Duration::from_secs(reveal_delay_secs),
                ..GameConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.room_id, "main-room");
        assert_eq!(config.reveal_delay, Duration::from_secs(5));
    }
}
