//! Bracket pairing engine.
//!
//! This module provides:
//! - Player, slot, match and round models
//! - Balanced single-elimination round generation with BYE padding
//! - An injectable randomness source for seeding order
//!
//! ## Example
//!
//! ```
//! use knockout::bracket::{ByePolicy, IdentityShuffler, Player, generate_round};
//!
//! let field = vec![
//!     Player::new("1", "Ada").unwrap(),
//!     Player::new("2", "Grace").unwrap(),
//!     Player::new("3", "Linus").unwrap(),
//! ];
//!
//! let round = generate_round(&field, 1, &mut IdentityShuffler, ByePolicy::AutoAdvance).unwrap();
//! assert_eq!(round.len(), 2);
//! assert_eq!(round.pending_matches().count(), 1);
//! ```

pub mod models;
pub mod pairing;
pub mod shuffler;

pub use models::{Match, Player, PlayerId, Round, Slot, ValidationError};
pub use pairing::{ByePolicy, MIN_CONTESTANTS, generate_round, next_power_of_two, rounds_needed};
pub use shuffler::{IdentityShuffler, RandomShuffler, Shuffler};
