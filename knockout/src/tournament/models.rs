//! Tournament data models.

use crate::bracket::{Player, Round, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Tournament status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// No tournament exists
    Idle,
    /// Accepting registrations
    Registering,
    /// Bracket in play
    InProgress,
    /// Champion decided
    Completed,
}

impl TournamentStatus {
    /// Registering or in progress
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TournamentStatus::Registering | TournamentStatus::InProgress
        )
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentStatus::Idle => write!(f, "idle"),
            TournamentStatus::Registering => write!(f, "registering"),
            TournamentStatus::InProgress => write!(f, "in progress"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Deserialize)]
struct DetailsFields {
    name: String,
    #[serde(default)]
    prize: String,
    #[serde(default)]
    entry_fee: String,
}

/// Operator-supplied description of the tournament.
///
/// Prize and entry fee are free text; the core never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DetailsFields")]
pub struct TournamentDetails {
    name: String,
    prize: String,
    entry_fee: String,
}

impl TournamentDetails {
    pub fn new(
        name: impl Into<String>,
        prize: impl Into<String>,
        entry_fee: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyTournamentName);
        }
        Ok(Self {
            name,
            prize: prize.into().trim().to_string(),
            entry_fee: entry_fee.into().trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prize(&self) -> &str {
        &self.prize
    }

    pub fn entry_fee(&self) -> &str {
        &self.entry_fee
    }
}

impl TryFrom<DetailsFields> for TournamentDetails {
    type Error = ValidationError;

    fn try_from(fields: DetailsFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.prize, fields.entry_fee)
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Added to the roster
    Registered,
    /// Id already on the roster; nothing changed
    AlreadyRegistered,
    /// Added, and the roster reached the start threshold
    Started(Round),
}

impl JoinOutcome {
    /// Whether the join mutated the tournament
    pub fn changed(&self) -> bool {
        !matches!(self, JoinOutcome::AlreadyRegistered)
    }
}

/// Result of a successful winner declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Result stored; the round still has open matches
    MatchRecorded { match_id: u32 },
    /// Round finished and the next one was paired
    RoundAdvanced(Round),
    /// Final match decided
    TournamentWon(Player),
}

/// Read-only view of the tournament for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentSnapshot {
    pub id: Option<TournamentId>,
    pub status: TournamentStatus,
    pub details: Option<TournamentDetails>,
    pub roster: Vec<Player>,
    pub current_round: Option<Round>,
    pub completed_rounds: Vec<Round>,
    pub champion: Option<Player>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TournamentSnapshot {
    /// Snapshot of an empty session
    pub fn idle() -> Self {
        Self {
            id: None,
            status: TournamentStatus::Idle,
            details: None,
            roster: Vec::new(),
            current_round: None,
            completed_rounds: Vec::new(),
            champion: None,
            created_at: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Completed rounds followed by the live one
    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.completed_rounds.iter().chain(self.current_round.iter())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
