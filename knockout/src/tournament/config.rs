//! Tournament configuration.

use super::errors::{ConfigError, ConfigResult};
use crate::bracket::{ByePolicy, MIN_CONTESTANTS};
use serde::{Deserialize, Serialize};

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Roster size at which the first round is generated (minimum 2)
    pub start_threshold: usize,

    /// Handling of players drawn against a BYE
    pub bye_policy: ByePolicy,

    /// Reject new registrations once the first round exists
    pub freeze_roster_on_start: bool,

    /// Session inbox capacity
    pub inbox_capacity: usize,

    /// Per-subscriber notification buffer
    pub subscriber_capacity: usize,

    /// Fixed seed for bracket shuffling (OS entropy when unset)
    pub rng_seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            start_threshold: MIN_CONTESTANTS,
            bye_policy: ByePolicy::AutoAdvance,
            freeze_roster_on_start: true,
            inbox_capacity: 100,
            subscriber_capacity: 16,
            rng_seed: None,
        }
    }
}

impl TournamentConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.start_threshold < MIN_CONTESTANTS {
            return Err(ConfigError::Invalid {
                var: "start_threshold".to_string(),
                reason: format!("Must be at least {MIN_CONTESTANTS}"),
            });
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "inbox_capacity".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.subscriber_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "subscriber_capacity".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
