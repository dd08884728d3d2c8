//! Integration tests for tournament functionality
//!
//! These tests drive complete tournaments from registration through the
//! final match.

use knockout::bracket::{ByePolicy, IdentityShuffler, Player, PlayerId, RandomShuffler, Slot};
use knockout::tournament::{
    JoinOutcome, RoundOutcome, Tournament, TournamentConfig, TournamentDetails, TournamentError,
    TournamentStatus,
};
use std::collections::BTreeSet;

fn field(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("id-{i}"), format!("Player {i}")).unwrap())
        .collect()
}

fn details() -> TournamentDetails {
    TournamentDetails::new("Integration Open", "500", "10").unwrap()
}

/// Create a tournament and register `players`, starting once all are in.
fn started(config: TournamentConfig, seed: u64, players: &[Player]) -> Tournament {
    let config = TournamentConfig {
        start_threshold: players.len().max(2),
        ..config
    };
    let mut tournament = Tournament::new(config, Box::new(RandomShuffler::seeded(seed))).unwrap();
    tournament.create(details()).unwrap();
    for player in players {
        tournament.join(player.clone()).unwrap();
    }
    tournament
}

/// Resolve every open match, picking slot A or B from `pick`, until a champion emerges.
/// Returns the number of rounds played.
fn play_out(tournament: &mut Tournament, mut pick: impl FnMut() -> bool) -> u32 {
    let mut rounds = 0;
    loop {
        let round = tournament.current_round().unwrap().clone();
        rounds += 1;

        let winners: Vec<PlayerId> = round
            .pending_matches()
            .map(|m| {
                let slot = match (m.slot_a(), m.slot_b()) {
                    (Slot::Bye, other) | (other, Slot::Bye) => other,
                    (a, b) => {
                        if pick() {
                            a
                        } else {
                            b
                        }
                    }
                };
                slot.player().unwrap().id().clone()
            })
            .collect();

        let mut last = None;
        for winner in &winners {
            last = Some(tournament.declare_winner(winner).unwrap());
        }

        match last {
            Some(RoundOutcome::TournamentWon(_)) => return rounds,
            Some(RoundOutcome::RoundAdvanced(next)) => assert_eq!(next.number(), rounds + 1),
            other => panic!("round {rounds} ended with {other:?}"),
        }
    }
}

#[test]
fn test_convergence_for_field_sizes() {
    for n in 2..=33usize {
        for policy in [ByePolicy::AutoAdvance, ByePolicy::AwaitDeclaration] {
            let players = field(n);
            let config = TournamentConfig {
                bye_policy: policy,
                ..Default::default()
            };
            let mut tournament = started(config, n as u64, &players);
            assert_eq!(tournament.status(), TournamentStatus::InProgress);

            let mut toggle = false;
            let rounds = play_out(&mut tournament, || {
                toggle = !toggle;
                toggle
            });

            let expected = (n as f64).log2().ceil() as u32;
            assert_eq!(rounds, expected, "n = {n}, policy = {policy}");
            assert_eq!(tournament.status(), TournamentStatus::Completed);
            let champion = tournament.champion().unwrap();
            assert!(players.contains(champion));
        }
    }
}

#[test]
fn test_three_player_bracket() {
    let players = field(3);
    let mut tournament = started(TournamentConfig::default(), 11, &players);

    let round = tournament.current_round().unwrap().clone();
    assert_eq!(round.len(), 2);
    let byes = round
        .matches()
        .iter()
        .flat_map(|m| [m.slot_a(), m.slot_b()])
        .filter(|slot| slot.is_bye())
        .count();
    assert_eq!(byes, 1);

    let open = round.pending_matches().next().unwrap();
    let winner = open.slot_a().player().unwrap().id().clone();
    let outcome = tournament.declare_winner(&winner).unwrap();

    let RoundOutcome::RoundAdvanced(final_round) = outcome else {
        panic!("expected the final, got {outcome:?}");
    };
    assert_eq!(final_round.len(), 1);
    assert_eq!(final_round.contestants().count(), 2);
    assert!(final_round.matches().iter().all(|m| !m.is_bye()));

    let finalist = final_round.contestants().next().unwrap().id().clone();
    assert!(matches!(
        tournament.declare_winner(&finalist),
        Ok(RoundOutcome::TournamentWon(ref p)) if p.id() == &finalist
    ));
    assert_eq!(tournament.status(), TournamentStatus::Completed);
}

#[test]
fn test_resolution_order_does_not_change_next_round() {
    let players = field(4);

    let run = |reverse: bool| {
        let config = TournamentConfig {
            start_threshold: 4,
            ..Default::default()
        };
        let mut tournament = Tournament::new(config, Box::new(IdentityShuffler)).unwrap();
        tournament.create(details()).unwrap();
        for player in &players {
            tournament.join(player.clone()).unwrap();
        }

        // id-0 vs id-3, id-1 vs id-2
        let mut order = vec!["id-0", "id-2"];
        if reverse {
            order.reverse();
        }
        let mut last = None;
        for id in order {
            last = Some(tournament.declare_winner(&PlayerId::new(id).unwrap()).unwrap());
        }
        let Some(RoundOutcome::RoundAdvanced(next)) = last else {
            panic!("round did not advance");
        };
        next.contestants()
            .map(|p| p.id().clone())
            .collect::<BTreeSet<_>>()
    };

    assert_eq!(run(false), run(true));
}

#[test]
fn test_rejected_declaration_leaves_round_byte_identical() {
    let players = field(5);
    let mut tournament = started(TournamentConfig::default(), 5, &players);
    let before = serde_json::to_string(&tournament.snapshot()).unwrap();

    let stranger = PlayerId::new("stranger").unwrap();
    assert_eq!(
        tournament.declare_winner(&stranger),
        Err(TournamentError::NoActiveMatchForPlayer {
            player_id: stranger.clone()
        })
    );

    let after = serde_json::to_string(&tournament.snapshot()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_join_idempotent_across_lifecycle() {
    let mut tournament = Tournament::new(
        TournamentConfig {
            start_threshold: 3,
            ..Default::default()
        },
        Box::new(IdentityShuffler),
    )
    .unwrap();
    tournament.create(details()).unwrap();

    let players = field(3);
    tournament.join(players[0].clone()).unwrap();
    tournament.join(players[1].clone()).unwrap();
    let roster_before: Vec<_> = tournament.roster().to_vec();

    assert_eq!(
        tournament.join(players[0].clone()),
        Ok(JoinOutcome::AlreadyRegistered)
    );
    assert_eq!(tournament.roster(), roster_before.as_slice());

    assert!(matches!(
        tournament.join(players[2].clone()),
        Ok(JoinOutcome::Started(_))
    ));
    assert_eq!(
        tournament.join(players[1].clone()),
        Ok(JoinOutcome::AlreadyRegistered)
    );
    assert_eq!(tournament.roster().len(), 3);
}

#[test]
fn test_join_after_completion_rejected() {
    let players = field(2);
    let mut tournament = started(TournamentConfig::default(), 1, &players);
    tournament.declare_winner(players[0].id()).unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Completed);

    assert_eq!(
        tournament.join(Player::new("late", "Late Larry").unwrap()),
        Err(TournamentError::NoActiveTournament)
    );
}

#[test]
fn test_snapshot_records_full_bracket_history() {
    let players = field(8);
    let mut tournament = started(TournamentConfig::default(), 8, &players);
    play_out(&mut tournament, || true);

    let snapshot = tournament.snapshot();
    let sizes: Vec<usize> = snapshot.rounds().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    let numbers: Vec<u32> = snapshot.rounds().map(|r| r.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(snapshot.rounds().all(|r| r.is_complete()));
    assert!(snapshot.started_at.is_some());
    assert!(snapshot.champion.is_some());
}

#[test]
fn test_reset_then_recreate() {
    let players = field(4);
    let mut tournament = started(TournamentConfig::default(), 2, &players);
    assert!(tournament.reset());
    assert_eq!(tournament.status(), TournamentStatus::Idle);

    assert_eq!(
        tournament.declare_winner(players[0].id()),
        Err(TournamentError::NoActiveTournament)
    );
    tournament.create(details()).unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Registering);
    assert!(tournament.roster().is_empty());
}
