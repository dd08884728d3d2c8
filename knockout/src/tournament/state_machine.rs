//! Tournament state machine.
//!
//! Owns the canonical tournament record and applies one event at a time.
//! Every operation validates before it mutates, so a rejected call leaves the
//! record untouched.

use super::{
    config::TournamentConfig,
    errors::{ConfigResult, TournamentError, TournamentResult},
    models::{
        JoinOutcome, RoundOutcome, TournamentDetails, TournamentId, TournamentSnapshot,
        TournamentStatus,
    },
};
use crate::bracket::{
    MIN_CONTESTANTS, Player, PlayerId, RandomShuffler, Round, Shuffler, generate_round,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use uuid::Uuid;

/// State of a created tournament. `Idle` is the absence of a record.
#[derive(Debug, Clone)]
struct TournamentRecord {
    id: TournamentId,
    status: TournamentStatus,
    details: TournamentDetails,
    roster: Vec<Player>,
    current_round: Option<Round>,
    completed_rounds: Vec<Round>,
    champion: Option<Player>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl TournamentRecord {
    fn new(details: TournamentDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: TournamentStatus::Registering,
            details,
            roster: Vec::new(),
            current_round: None,
            completed_rounds: Vec::new(),
            champion: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    fn is_registered(&self, player_id: &PlayerId) -> bool {
        self.roster.iter().any(|p| p.id() == player_id)
    }

    fn begin(&mut self, round: Round) {
        self.status = TournamentStatus::InProgress;
        self.started_at = Some(Utc::now());
        self.current_round = Some(round);
    }
}

/// Borrow the record of a tournament that still accepts events.
fn active(record: &mut Option<TournamentRecord>) -> TournamentResult<&mut TournamentRecord> {
    match record {
        Some(record) if record.status.is_active() => Ok(record),
        _ => Err(TournamentError::NoActiveTournament),
    }
}

/// Single-elimination tournament state machine.
///
/// Holds at most one tournament. Not synchronized: callers apply events one at
/// a time, either by owning it directly or through the session actor.
pub struct Tournament {
    config: TournamentConfig,
    shuffler: Box<dyn Shuffler>,
    record: Option<TournamentRecord>,
}

impl Tournament {
    /// Create an idle state machine with an explicit randomness source
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails validation
    pub fn new(config: TournamentConfig, shuffler: Box<dyn Shuffler>) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            shuffler,
            record: None,
        })
    }

    /// Create an idle state machine shuffling with `config.rng_seed`
    pub fn with_random_seeding(config: TournamentConfig) -> ConfigResult<Self> {
        let shuffler = RandomShuffler::from_seed(config.rng_seed);
        Self::new(config, Box::new(shuffler))
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn status(&self) -> TournamentStatus {
        self.record
            .as_ref()
            .map_or(TournamentStatus::Idle, |record| record.status)
    }

    pub fn id(&self) -> Option<TournamentId> {
        self.record.as_ref().map(|record| record.id)
    }

    pub fn roster(&self) -> &[Player] {
        self.record
            .as_ref()
            .map(|record| record.roster.as_slice())
            .unwrap_or_default()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.record
            .as_ref()
            .and_then(|record| record.current_round.as_ref())
    }

    pub fn champion(&self) -> Option<&Player> {
        self.record
            .as_ref()
            .and_then(|record| record.champion.as_ref())
    }

    /// Number of the live round, 0 before the bracket exists
    pub fn round_number(&self) -> u32 {
        self.current_round().map_or(0, Round::number)
    }

    /// Open registration for a new tournament.
    ///
    /// Allowed from `Idle` and from `Completed`, which discards the finished one.
    pub fn create(&mut self, details: TournamentDetails) -> TournamentResult<()> {
        if self.status().is_active() {
            return Err(TournamentError::TournamentAlreadyActive);
        }

        let record = TournamentRecord::new(details);
        info!(
            "Tournament {} '{}' open for registration",
            record.id,
            record.details.name()
        );
        self.record = Some(record);
        Ok(())
    }

    /// Register a player.
    ///
    /// Repeat ids are a no-op. Reaching the start threshold pairs the first round.
    pub fn join(&mut self, player: Player) -> TournamentResult<JoinOutcome> {
        let record = active(&mut self.record)?;

        if record.is_registered(player.id()) {
            debug!("Player {} already registered", player.id());
            return Ok(JoinOutcome::AlreadyRegistered);
        }

        if record.status == TournamentStatus::InProgress {
            if self.config.freeze_roster_on_start {
                return Err(TournamentError::RegistrationClosed);
            }
            // Late entrant: on the roster, not in the bracket.
            debug!("Player {} joined after the bracket was drawn", player.id());
            record.roster.push(player);
            return Ok(JoinOutcome::Registered);
        }

        if record.roster.len() + 1 < self.config.start_threshold {
            debug!("Player {} ({}) registered", player.id(), player);
            record.roster.push(player);
            return Ok(JoinOutcome::Registered);
        }

        let mut contestants = record.roster.clone();
        contestants.push(player);
        let round = generate_round(
            &contestants,
            1,
            self.shuffler.as_mut(),
            self.config.bye_policy,
        )?;

        record.roster = contestants;
        record.begin(round.clone());
        info!(
            "Tournament {} started with {} players, {} matches in round 1",
            record.id,
            record.roster.len(),
            round.len()
        );
        Ok(JoinOutcome::Started(round))
    }

    /// Remove a player before the bracket is drawn.
    pub fn leave(&mut self, player_id: &PlayerId) -> TournamentResult<Player> {
        let record = active(&mut self.record)?;

        if record.status == TournamentStatus::InProgress {
            return Err(TournamentError::RegistrationClosed);
        }

        let position = record
            .roster
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| TournamentError::PlayerNotRegistered {
                player_id: player_id.clone(),
            })?;

        let player = record.roster.remove(position);
        debug!("Player {} left tournament {}", player_id, record.id);
        Ok(player)
    }

    /// Close registration and pair the first round with the current roster.
    pub fn start(&mut self) -> TournamentResult<Round> {
        let record = active(&mut self.record)?;

        if record.status == TournamentStatus::InProgress {
            return Err(TournamentError::RegistrationClosed);
        }

        if record.roster.len() < MIN_CONTESTANTS {
            return Err(TournamentError::InsufficientContestants {
                needed: MIN_CONTESTANTS,
                current: record.roster.len(),
            });
        }

        let round = generate_round(
            &record.roster,
            1,
            self.shuffler.as_mut(),
            self.config.bye_policy,
        )?;
        record.begin(round.clone());
        info!(
            "Tournament {} started early with {} players",
            record.id,
            record.roster.len()
        );
        Ok(round)
    }

    /// Record the winner of the open match holding `player_id`.
    ///
    /// When that result completes the round, the distinct non-BYE winners either
    /// crown a champion or are paired into the next round.
    pub fn declare_winner(&mut self, player_id: &PlayerId) -> TournamentResult<RoundOutcome> {
        let record = active(&mut self.record)?;

        let no_match = || TournamentError::NoActiveMatchForPlayer {
            player_id: player_id.clone(),
        };

        let mut round = record.current_round.clone().ok_or_else(no_match)?;
        let match_id = round.record_winner(player_id).ok_or_else(no_match)?;

        if !round.is_complete() {
            debug!(
                "Round {} match {} won by {}",
                round.number(),
                match_id,
                player_id
            );
            record.current_round = Some(round);
            return Ok(RoundOutcome::MatchRecorded { match_id });
        }

        let mut winners = round.winners();
        if winners.len() == 1 {
            let champion = winners.remove(0);
            info!(
                "Tournament {} won by {} after {} rounds",
                record.id,
                champion,
                round.number()
            );
            record.current_round = Some(round);
            record.champion = Some(champion.clone());
            record.status = TournamentStatus::Completed;
            record.completed_at = Some(Utc::now());
            return Ok(RoundOutcome::TournamentWon(champion));
        }

        let next = generate_round(
            &winners,
            round.number() + 1,
            self.shuffler.as_mut(),
            self.config.bye_policy,
        )?;
        info!(
            "Tournament {} advanced to round {} with {} players",
            record.id,
            next.number(),
            winners.len()
        );
        record.completed_rounds.push(round);
        record.current_round = Some(next.clone());
        Ok(RoundOutcome::RoundAdvanced(next))
    }

    /// Discard any tournament and return to `Idle`. Returns whether one existed.
    pub fn reset(&mut self) -> bool {
        match self.record.take() {
            Some(record) => {
                info!("Tournament {} reset", record.id);
                true
            }
            None => false,
        }
    }

    /// Read-only projection for renderers
    pub fn snapshot(&self) -> TournamentSnapshot {
        match &self.record {
            None => TournamentSnapshot::idle(),
            Some(record) => TournamentSnapshot {
                id: Some(record.id),
                status: record.status,
                details: Some(record.details.clone()),
                roster: record.roster.clone(),
                current_round: record.current_round.clone(),
                completed_rounds: record.completed_rounds.clone(),
                champion: record.champion.clone(),
                created_at: Some(record.created_at),
                started_at: record.started_at,
                completed_at: record.completed_at,
            },
        }
    }
}
