//! Tournament session message types.

use crate::bracket::{Player, PlayerId, Round};
use crate::tournament::{
    JoinOutcome, RoundOutcome, TournamentDetails, TournamentResult, TournamentSnapshot,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Key identifying a notification subscriber
pub type SubscriberId = String;

/// Messages that can be sent to a TournamentActor
#[derive(Debug)]
pub enum TournamentMessage {
    /// Open a new tournament
    Create {
        details: TournamentDetails,
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Participant joined
    Join {
        player: Player,
        response: oneshot::Sender<TournamentResult<JoinOutcome>>,
    },

    /// Withdraw before the bracket is drawn
    Leave {
        player_id: PlayerId,
        response: oneshot::Sender<TournamentResult<Player>>,
    },

    /// Close registration early
    Start {
        response: oneshot::Sender<TournamentResult<Round>>,
    },

    /// Winner declared
    DeclareWinner {
        player_id: PlayerId,
        response: oneshot::Sender<TournamentResult<RoundOutcome>>,
    },

    /// Discard the tournament (admin only)
    Reset { response: oneshot::Sender<bool> },

    /// Get current snapshot
    GetSnapshot {
        response: oneshot::Sender<TournamentSnapshot>,
    },

    /// Subscribe to snapshot change notifications
    Subscribe {
        subscriber_id: SubscriberId,
        sender: mpsc::Sender<SnapshotChanged>,
    },

    /// Unsubscribe from snapshot change notifications
    Unsubscribe { subscriber_id: SubscriberId },

    /// Stop the actor
    Shutdown,
}

/// What kind of transition produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Created,
    RosterChanged,
    RoundStarted,
    MatchRecorded,
    RoundAdvanced,
    TournamentWon,
    Reset,
}

/// Notification sent after every mutating transition
///
/// Delivery is best effort. The actor never waits on a subscriber: when a
/// subscriber's buffer is full the notification is dropped for that
/// subscriber only, with a warning. Every notification carries the whole
/// snapshot, so the next one received (or a call to
/// [`TournamentHandle::snapshot`](super::TournamentHandle::snapshot))
/// brings a lagging subscriber fully up to date.
#[derive(Debug, Clone)]
pub struct SnapshotChanged {
    pub cause: ChangeCause,
    pub snapshot: Arc<TournamentSnapshot>,
}
