//! Single-elimination round generation.

use super::{
    models::{Match, Player, Round, Slot},
    shuffler::Shuffler,
};
use crate::tournament::errors::{TournamentError, TournamentResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Fewest contestants that can form a round.
pub const MIN_CONTESTANTS: usize = 2;

/// What happens to a real player drawn against a BYE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByePolicy {
    /// The player is recorded as winner when the round is generated.
    #[default]
    AutoAdvance,
    /// The match stays open until the player is declared winner.
    AwaitDeclaration,
}

impl fmt::Display for ByePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByePolicy::AutoAdvance => write!(f, "auto"),
            ByePolicy::AwaitDeclaration => write!(f, "await"),
        }
    }
}

impl FromStr for ByePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "auto_advance" => Ok(ByePolicy::AutoAdvance),
            "await" | "await_declaration" => Ok(ByePolicy::AwaitDeclaration),
            other => Err(format!("unknown bye policy '{other}' (expected auto or await)")),
        }
    }
}

/// Smallest power of two `>= n` (1 for 0).
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Number of rounds a field of `n` needs to produce a champion.
pub fn rounds_needed(n: usize) -> u32 {
    next_power_of_two(n).trailing_zeros()
}

/// Build a balanced round from `contestants`.
///
/// Contestants are permuted by `shuffler`, right-padded with BYEs up to the next
/// power of two, and match `i` pairs slot `i` with slot `n - 1 - i`. BYEs only
/// ever land opposite a real player, since fewer than half the slots are BYEs.
///
/// # Errors
///
/// `InsufficientContestants` when fewer than two contestants are given.
pub fn generate_round(
    contestants: &[Player],
    number: u32,
    shuffler: &mut dyn Shuffler,
    bye_policy: ByePolicy,
) -> TournamentResult<Round> {
    if contestants.len() < MIN_CONTESTANTS {
        return Err(TournamentError::InsufficientContestants {
            needed: MIN_CONTESTANTS,
            current: contestants.len(),
        });
    }

    let mut permuted = contestants.to_vec();
    shuffler.shuffle(&mut permuted);

    let bracket_size = next_power_of_two(permuted.len());
    let mut slots: Vec<Slot> = permuted.into_iter().map(Slot::Player).collect();
    slots.resize(bracket_size, Slot::Bye);

    let matches = (0..bracket_size / 2)
        .zip(1u32..)
        .map(|(i, match_id)| {
            let mut m = Match::new(
                match_id,
                slots[i].clone(),
                slots[bracket_size - 1 - i].clone(),
            );
            if bye_policy == ByePolicy::AutoAdvance {
                m.resolve_bye();
            }
            m
        })
        .collect();

    Ok(Round::new(number, matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::shuffler::{IdentityShuffler, RandomShuffler};

    fn players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")).unwrap())
            .collect()
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
        assert_eq!(next_power_of_two(9), 16);
    }

    #[test]
    fn test_rounds_needed() {
        assert_eq!(rounds_needed(2), 1);
        assert_eq!(rounds_needed(3), 2);
        assert_eq!(rounds_needed(4), 2);
        assert_eq!(rounds_needed(5), 3);
        assert_eq!(rounds_needed(16), 4);
        assert_eq!(rounds_needed(17), 5);
    }

    #[test]
    fn test_rejects_fewer_than_two() {
        for n in 0..2 {
            let err = generate_round(&players(n), 1, &mut IdentityShuffler, ByePolicy::default())
                .unwrap_err();
            assert_eq!(
                err,
                TournamentError::InsufficientContestants {
                    needed: 2,
                    current: n
                }
            );
        }
    }

    #[test]
    fn test_outer_pairs_with_inner() {
        let field = players(6);
        let round =
            generate_round(&field, 1, &mut IdentityShuffler, ByePolicy::AwaitDeclaration).unwrap();

        // 6 players -> 8 slots: p0..p5, BYE, BYE
        let layout: Vec<(u32, String, String)> = round
            .matches()
            .iter()
            .map(|m| (m.match_id(), m.slot_a().to_string(), m.slot_b().to_string()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (1, "Player 0".into(), "BYE".into()),
                (2, "Player 1".into(), "BYE".into()),
                (3, "Player 2".into(), "Player 5".into()),
                (4, "Player 3".into(), "Player 4".into()),
            ]
        );
        assert!(round.matches().iter().all(|m| !m.is_resolved()));
    }

    #[test]
    fn test_auto_advance_resolves_bye_matches() {
        let field = players(3);
        let round =
            generate_round(&field, 1, &mut IdentityShuffler, ByePolicy::AutoAdvance).unwrap();

        assert_eq!(round.len(), 2);
        let bye_match = &round.matches()[0];
        assert!(bye_match.is_bye());
        assert_eq!(bye_match.winner(), Some(&Slot::Player(field[0].clone())));

        let real_match = &round.matches()[1];
        assert!(!real_match.is_resolved());
        assert_eq!(round.pending_matches().count(), 1);
    }

    #[test]
    fn test_power_of_two_field_has_no_byes() {
        let round =
            generate_round(&players(8), 1, &mut RandomShuffler::seeded(3), ByePolicy::default())
                .unwrap();
        assert_eq!(round.len(), 4);
        assert!(round.matches().iter().all(|m| !m.is_bye()));
        assert_eq!(round.pending_matches().count(), 4);
    }

    #[test]
    fn test_round_number_is_kept() {
        let round =
            generate_round(&players(2), 3, &mut IdentityShuffler, ByePolicy::default()).unwrap();
        assert_eq!(round.number(), 3);
        assert_eq!(round.matches()[0].match_id(), 1);
    }

    #[test]
    fn test_bye_policy_parse() {
        assert_eq!("auto".parse::<ByePolicy>(), Ok(ByePolicy::AutoAdvance));
        assert_eq!(" AWAIT ".parse::<ByePolicy>(), Ok(ByePolicy::AwaitDeclaration));
        assert_eq!(
            "await_declaration".parse::<ByePolicy>(),
            Ok(ByePolicy::AwaitDeclaration)
        );
        assert!("sometimes".parse::<ByePolicy>().is_err());
        assert_eq!(ByePolicy::AutoAdvance.to_string(), "auto");
    }
}
