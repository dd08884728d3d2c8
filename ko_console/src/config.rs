//! Console configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use knockout::bracket::ByePolicy;
use knockout::tournament::{ConfigError, TournamentConfig};

/// Values given on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub bye_policy: Option<ByePolicy>,
    pub start_threshold: Option<usize>,
}

/// Complete console configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Engine configuration
    pub tournament: TournamentConfig,
    /// Print snapshots as JSON instead of text
    pub json_snapshots: bool,
}

impl ConsoleConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable cannot be parsed or the result fails validation
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = TournamentConfig::default();

        let bye_policy = match overrides.bye_policy {
            Some(policy) => policy,
            None => match std::env::var("KO_BYE_POLICY") {
                Ok(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                    var: "KO_BYE_POLICY".to_string(),
                    reason,
                })?,
                Err(_) => defaults.bye_policy,
            },
        };

        let rng_seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => match std::env::var("KO_RNG_SEED") {
                Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                    var: "KO_RNG_SEED".to_string(),
                    reason: format!("'{value}' is not an unsigned integer"),
                })?),
                Err(_) => None,
            },
        };

        let tournament = TournamentConfig {
            start_threshold: overrides
                .start_threshold
                .unwrap_or_else(|| parse_env_or("KO_START_THRESHOLD", defaults.start_threshold)),
            bye_policy,
            freeze_roster_on_start: parse_env_or(
                "KO_FREEZE_ROSTER",
                defaults.freeze_roster_on_start,
            ),
            inbox_capacity: parse_env_or("KO_INBOX_CAPACITY", defaults.inbox_capacity),
            subscriber_capacity: parse_env_or(
                "KO_SUBSCRIBER_CAPACITY",
                defaults.subscriber_capacity,
            ),
            rng_seed,
        };

        let config = Self {
            tournament,
            json_snapshots: parse_env_or("KO_JSON_SNAPSHOTS", false),
        };
        config.tournament.validate()?;
        Ok(config)
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
