//! # Knockout
//!
//! A single-elimination tournament engine: player registration, randomized
//! bracket pairing, round-by-round advancement, and champion detection.
//!
//! ## Architecture
//!
//! The engine has three layers:
//!
//! - **Bracket**: pure pairing generator. Contestants are shuffled, padded with
//!   BYEs up to the next power of two, and paired outer slot against inner slot.
//! - **Tournament**: the state machine (`Idle → Registering → InProgress →
//!   Completed`) owning the roster, the live round, and the champion.
//! - **Session**: an actor that owns the state machine, serializes every event
//!   through one inbox, and broadcasts snapshot notifications.
//!
//! Rendering, messaging, and persistence are left to the host application,
//! which consumes [`tournament::TournamentSnapshot`] values.
//!
//! ## Core Modules
//!
//! - [`bracket`]: players, matches, rounds, and round generation
//! - [`tournament`]: the state machine, configuration, and errors
//! - [`session`]: the actor and its handle
//!
//! ## Example
//!
//! ```
//! use knockout::{Tournament, TournamentConfig};
//!
//! let tournament = Tournament::with_random_seeding(TournamentConfig::default()).unwrap();
//! assert!(tournament.current_round().is_none());
//! ```

/// Players, matches, rounds, and pairing.
pub mod bracket;
pub use bracket::{ByePolicy, Player, PlayerId, Round, Shuffler, generate_round};

/// Tournament state machine.
pub mod tournament;
pub use tournament::{
    RoundOutcome, Tournament, TournamentConfig, TournamentDetails, TournamentError,
    TournamentSnapshot, TournamentStatus,
};

/// Actor-based session around the state machine.
pub mod session;
pub use session::{SessionError, TournamentActor, TournamentHandle};
