//! Error types for the tournament state machine.

use crate::bracket::PlayerId;
use thiserror::Error;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Rejected tournament operations.
///
/// Every variant leaves the tournament record exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("A tournament is already active")]
    TournamentAlreadyActive,

    #[error("No active tournament")]
    NoActiveTournament,

    #[error("No open match for player {player_id}")]
    NoActiveMatchForPlayer { player_id: PlayerId },

    #[error("Insufficient contestants: need {needed}, have {current}")]
    InsufficientContestants { needed: usize, current: usize },

    #[error("Registration is closed")]
    RegistrationClosed,

    #[error("Player not registered: {player_id}")]
    PlayerNotRegistered { player_id: PlayerId },
}

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_player() {
        let player_id = PlayerId::new("u-17").unwrap();
        let err = TournamentError::NoActiveMatchForPlayer {
            player_id: player_id.clone(),
        };
        assert!(err.to_string().contains("u-17"));

        let err = TournamentError::PlayerNotRegistered { player_id };
        assert!(err.to_string().contains("u-17"));
    }

    #[test]
    fn test_insufficient_contestants_message() {
        let err = TournamentError::InsufficientContestants {
            needed: 2,
            current: 1,
        };
        assert_eq!(err.to_string(), "Insufficient contestants: need 2, have 1");
    }
}
