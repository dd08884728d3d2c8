//! Tournament session built on the async actor model.
//!
//! This module implements:
//! - TournamentActor: owns the single live tournament and applies events one at a time
//! - TournamentHandle: cloneable sender used by the event source and renderers
//! - Snapshot change notifications for subscribers
//!
//! ## Architecture
//!
//! The actor runs in its own Tokio task with an mpsc inbox. Each request carries
//! a oneshot reply channel. After a transition mutates the tournament, every
//! subscriber receives a [`SnapshotChanged`] through a non-blocking send, so a
//! slow renderer never holds up the next event.
//!
//! ## Example
//!
//! ```
//! use knockout::bracket::{Player, RandomShuffler};
//! use knockout::session::TournamentActor;
//! use knockout::tournament::{TournamentConfig, TournamentDetails};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = TournamentActor::spawn(
//!         TournamentConfig::default(),
//!         Box::new(RandomShuffler::seeded(42)),
//!     )
//!     .unwrap();
//!     let mut updates = handle.subscribe("renderer").await.unwrap();
//!
//!     handle
//!         .create(TournamentDetails::new("Friday Night", "Bragging rights", "0").unwrap())
//!         .await
//!         .unwrap();
//!     handle.join(Player::new("1", "Ada").unwrap()).await.unwrap();
//!
//!     let update = updates.recv().await.unwrap();
//!     println!("{:?}: {}", update.cause, update.snapshot.status);
//! }
//! ```

pub mod actor;
pub mod errors;
pub mod messages;

pub use actor::{TournamentActor, TournamentHandle};
pub use errors::{SessionError, SessionResult};
pub use messages::{ChangeCause, SnapshotChanged, SubscriberId, TournamentMessage};
