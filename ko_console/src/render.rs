//! Plain-text rendering of tournament snapshots.

use std::fmt::Write;

use knockout::bracket::{Match, Round, Slot};
use knockout::tournament::{TournamentSnapshot, TournamentStatus};

fn slot_label(slot: &Slot) -> String {
    match slot.player() {
        Some(player) => format!("{} ({})", player.display_name(), player.id()),
        None => "BYE".to_string(),
    }
}

fn match_line(m: &Match) -> String {
    let result = match m.winner().and_then(Slot::player) {
        Some(winner) if m.is_bye() => format!("advances: {}", winner.display_name()),
        Some(winner) => format!("winner: {}", winner.display_name()),
        None => "pending".to_string(),
    };
    format!(
        "  #{:<3} {} vs {}  [{}]",
        m.match_id(),
        slot_label(m.slot_a()),
        slot_label(m.slot_b()),
        result
    )
}

/// Render one round as a header plus one line per match
pub fn render_round(round: &Round) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {} ({} match{})",
        round.number(),
        round.len(),
        if round.len() == 1 { "" } else { "es" }
    );
    for m in round.matches() {
        let _ = writeln!(out, "{}", match_line(m));
    }
    out
}

/// Render the whole snapshot for the operator console
pub fn render_snapshot(snapshot: &TournamentSnapshot) -> String {
    let mut out = String::new();

    let Some(details) = &snapshot.details else {
        let _ = writeln!(out, "No tournament. Use 'create NAME | PRIZE | FEE'.");
        return out;
    };

    let _ = writeln!(out, "== {} [{}] ==", details.name(), snapshot.status);
    if !details.prize().is_empty() {
        let _ = writeln!(out, "Prize: {}", details.prize());
    }
    if !details.entry_fee().is_empty() {
        let _ = writeln!(out, "Entry fee: {}", details.entry_fee());
    }

    let names: Vec<&str> = snapshot
        .roster
        .iter()
        .map(|player| player.display_name())
        .collect();
    let _ = writeln!(out, "Players ({}): {}", names.len(), names.join(", "));

    for round in snapshot.rounds() {
        out.push_str(&render_round(round));
    }

    match (snapshot.status, &snapshot.champion) {
        (TournamentStatus::Completed, Some(champion)) => {
            let _ = writeln!(out, "Champion: {}", champion.display_name());
        }
        (TournamentStatus::Registering, _) => {
            let _ = writeln!(out, "Registration open.");
        }
        _ => {}
    }
    out
}
