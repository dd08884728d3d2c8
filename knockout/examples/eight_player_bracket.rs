//! Run an eight-player bracket with random seeding and print each round.

use knockout::bracket::{Player, RandomShuffler};
use knockout::tournament::{RoundOutcome, Tournament, TournamentConfig, TournamentDetails};

fn main() {
    let names = ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances"];
    let config = TournamentConfig {
        start_threshold: names.len(),
        ..Default::default()
    };
    let mut tournament = Tournament::new(config, Box::new(RandomShuffler::new())).unwrap();
    tournament
        .create(TournamentDetails::new("Pioneers Invitational", "Trophy", "Free").unwrap())
        .unwrap();

    for (i, name) in names.iter().enumerate() {
        tournament
            .join(Player::new(i.to_string(), *name).unwrap())
            .unwrap();
    }

    loop {
        let round = tournament.current_round().unwrap().clone();
        println!("Round {}", round.number());

        let mut last = None;
        for m in round.pending_matches() {
            // Lower player id wins
            let (a, b) = (m.slot_a().player().unwrap(), m.slot_b().player().unwrap());
            let winner = if a.id() < b.id() { a } else { b };
            println!("  #{} {} vs {} -> {}", m.match_id(), a, b, winner);
            last = Some(tournament.declare_winner(winner.id()).unwrap());
        }

        if let Some(RoundOutcome::TournamentWon(champion)) = last {
            println!("Champion: {champion}");
            break;
        }
    }
}
