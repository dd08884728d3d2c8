//! Error types for the session handle

use crate::tournament::TournamentError;
use thiserror::Error;

/// Result type for session calls
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Actor stopped before answering
    #[error("Tournament session is closed")]
    Closed,

    /// Operation rejected by the state machine
    #[error(transparent)]
    Tournament(#[from] TournamentError),
}
