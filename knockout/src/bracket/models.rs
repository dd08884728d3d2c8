//! Bracket data models: players, slots, matches and rounds.

use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, hash};
use thiserror::Error;

/// Rejections for malformed input arriving from the event source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player id must not be empty")]
    EmptyPlayerId,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("tournament name must not be empty")]
    EmptyTournamentName,
}

/// Opaque player identifier supplied by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyPlayerId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerId> for String {
    fn from(value: PlayerId) -> Self {
        value.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct PlayerFields {
    id: PlayerId,
    display_name: String,
}

/// A registered contestant.
///
/// Identity is the [`PlayerId`]; two players with the same id compare equal
/// even if their display names differ. Display names may collide across
/// players and are only used for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PlayerFields")]
pub struct Player {
    id: PlayerId,
    display_name: String,
}

impl Player {
    /// Build a player, rejecting blank ids and names.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = PlayerId::new(id)?;
        Self::with_id(id, display_name)
    }

    pub fn with_id(id: PlayerId, display_name: impl Into<String>) -> Result<Self, ValidationError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        Ok(Self { id, display_name })
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl TryFrom<PlayerFields> for Player {
    type Error = ValidationError;

    fn try_from(fields: PlayerFields) -> Result<Self, Self::Error> {
        Self::with_id(fields.id, fields.display_name)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl hash::Hash for Player {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Occupant of one side of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "lowercase")]
pub enum Slot {
    Player(Player),
    /// No opponent; the other side advances without playing.
    Bye,
}

impl Slot {
    pub fn player(&self) -> Option<&Player> {
        match self {
            Slot::Player(player) => Some(player),
            Slot::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }

    pub fn holds(&self, player_id: &PlayerId) -> bool {
        self.player().is_some_and(|player| player.id() == player_id)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Player(player) => write!(f, "{player}"),
            Slot::Bye => f.write_str("BYE"),
        }
    }
}

/// A single pairing inside a round.
///
/// The winner, once set, is always one of the two slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    match_id: u32,
    slot_a: Slot,
    slot_b: Slot,
    winner: Option<Slot>,
}

impl Match {
    pub(crate) fn new(match_id: u32, slot_a: Slot, slot_b: Slot) -> Self {
        Self {
            match_id,
            slot_a,
            slot_b,
            winner: None,
        }
    }

    pub fn match_id(&self) -> u32 {
        self.match_id
    }

    pub fn slot_a(&self) -> &Slot {
        &self.slot_a
    }

    pub fn slot_b(&self) -> &Slot {
        &self.slot_b
    }

    pub fn winner(&self) -> Option<&Slot> {
        self.winner.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.slot_a.holds(player_id) || self.slot_b.holds(player_id)
    }

    /// Real player drawn against a BYE.
    pub fn is_bye(&self) -> bool {
        self.slot_a.is_bye() != self.slot_b.is_bye()
    }

    /// Advance the real player of a BYE match. Returns whether a winner was set.
    pub(crate) fn resolve_bye(&mut self) -> bool {
        if self.is_resolved() || !self.is_bye() {
            return false;
        }
        let advancing = if self.slot_a.is_bye() {
            self.slot_b.clone()
        } else {
            self.slot_a.clone()
        };
        self.winner = Some(advancing);
        true
    }

    /// Record `player_id` as the winner if this match is still open and holds them.
    pub(crate) fn record_winner(&mut self, player_id: &PlayerId) -> bool {
        if self.is_resolved() {
            return false;
        }
        let winner = if self.slot_a.holds(player_id) {
            self.slot_a.clone()
        } else if self.slot_b.holds(player_id) {
            self.slot_b.clone()
        } else {
            return false;
        };
        self.winner = Some(winner);
        true
    }
}

/// One layer of the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    number: u32,
    matches: Vec<Match>,
}

impl Round {
    pub(crate) fn new(number: u32, matches: Vec<Match>) -> Self {
        Self { number, matches }
    }

    /// 1-based position of this round within the tournament.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Every match has a winner.
    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(Match::is_resolved)
    }

    pub fn pending_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| !m.is_resolved())
    }

    /// The unresolved match holding `player_id`, if any.
    pub fn match_for(&self, player_id: &PlayerId) -> Option<&Match> {
        self.pending_matches().find(|m| m.contains(player_id))
    }

    /// Real players seated in this round, in slot order.
    pub fn contestants(&self) -> impl Iterator<Item = &Player> {
        self.matches
            .iter()
            .flat_map(|m| [m.slot_a.player(), m.slot_b.player()])
            .flatten()
    }

    /// Distinct non-BYE winners in match order.
    ///
    /// Ordering follows the bracket, not the order in which results came in,
    /// so the next round's input set does not depend on resolution order.
    pub fn winners(&self) -> Vec<Player> {
        let mut seen = HashSet::new();
        self.matches
            .iter()
            .filter_map(|m| m.winner.as_ref().and_then(Slot::player))
            .filter(|player| seen.insert(player.id().clone()))
            .cloned()
            .collect()
    }

    /// Returns the id of the match that took the result.
    pub(crate) fn record_winner(&mut self, player_id: &PlayerId) -> Option<u32> {
        let match_id = self.match_for(player_id)?.match_id;
        self.matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
            .and_then(|m| m.record_winner(player_id).then_some(match_id))
    }
}
