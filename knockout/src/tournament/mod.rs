//! Tournament module for single-elimination brackets.
//!
//! This module provides tournament management functionality including:
//! - Tournament creation and configuration
//! - Player registration with idempotent joins
//! - Automatic bracket pairing once the start threshold is reached
//! - Round advancement and champion detection
//! - Read-only snapshots for renderers
//!
//! ## Example
//!
//! ```
//! use knockout::bracket::{IdentityShuffler, Player, PlayerId};
//! use knockout::tournament::{
//!     RoundOutcome, Tournament, TournamentConfig, TournamentDetails, TournamentStatus,
//! };
//!
//! let mut tournament =
//!     Tournament::new(TournamentConfig::default(), Box::new(IdentityShuffler)).unwrap();
//! tournament
//!     .create(TournamentDetails::new("Sunday Special", "Trophy", "Free").unwrap())
//!     .unwrap();
//!
//! tournament.join(Player::new("1", "Ada").unwrap()).unwrap();
//! tournament.join(Player::new("2", "Grace").unwrap()).unwrap();
//! assert_eq!(tournament.status(), TournamentStatus::InProgress);
//!
//! let outcome = tournament.declare_winner(&PlayerId::new("2").unwrap()).unwrap();
//! assert!(matches!(outcome, RoundOutcome::TournamentWon(_)));
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod state_machine;

pub use config::TournamentConfig;
pub use errors::{ConfigError, ConfigResult, TournamentError, TournamentResult};
pub use models::{
    JoinOutcome, RoundOutcome, TournamentDetails, TournamentId, TournamentSnapshot,
    TournamentStatus,
};
pub use state_machine::Tournament;
