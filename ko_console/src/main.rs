//! Operator console for a single-elimination tournament.
//!
//! Spawns one TournamentActor, reads commands from stdin and prints the
//! bracket whenever the tournament changes.

mod commands;
mod config;
mod logging;
mod render;

use anyhow::Error;
use ctrlc::set_handler;
use knockout::{
    bracket::{ByePolicy, RandomShuffler},
    session::{ChangeCause, SessionError, SnapshotChanged, TournamentActor, TournamentHandle},
    tournament::{JoinOutcome, RoundOutcome},
};
use log::{info, warn};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use commands::{Command, HELP as COMMANDS_HELP, parse_command};
use config::{ConsoleConfig, Overrides};

const HELP: &str = "\
Run a single-elimination tournament from the terminal

USAGE:
  ko_console [OPTIONS]

OPTIONS:
  --seed         N            Seed for bracket shuffling  [default: env KO_RNG_SEED or OS entropy]
  --bye-policy   POLICY       auto | await  [default: env KO_BYE_POLICY or auto]
  --threshold    N            Players needed to start the bracket  [default: env KO_START_THRESHOLD or 2]

FLAGS:
  --json                      Print snapshots as JSON
  -h, --help                  Print help information

ENVIRONMENT:
  KO_FREEZE_ROSTER            Reject joins once the bracket has started  [default: true]
  KO_INBOX_CAPACITY           Actor inbox size  [default: 100]
  KO_SUBSCRIBER_CAPACITY      Notification buffer per subscriber  [default: 16]
  RUST_LOG                    Log filter  [default: info,knockout=debug]
";

const SUBSCRIBER_ID: &str = "console";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        seed: pargs.opt_value_from_str("--seed")?,
        bye_policy: pargs.opt_value_from_str::<_, ByePolicy>("--bye-policy")?,
        start_threshold: pargs.opt_value_from_str("--threshold")?,
    };
    let json_flag = pargs.contains("--json");

    logging::init();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let mut config = ConsoleConfig::from_env(overrides)?;
    config.json_snapshots |= json_flag;
    info!(
        "Starting console (threshold {}, bye policy {}, seed {:?})",
        config.tournament.start_threshold, config.tournament.bye_policy, config.tournament.rng_seed
    );

    let shuffler = RandomShuffler::from_seed(config.tournament.rng_seed);
    let handle = TournamentActor::spawn(config.tournament.clone(), Box::new(shuffler))?;

    let updates = handle.subscribe(SUBSCRIBER_ID).await?;
    let printer = tokio::spawn(print_updates(updates, config.json_snapshots));

    print!("{COMMANDS_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                logging::log_rejected_command(&line, &err.to_string());
                println!("{err}");
                continue;
            }
        };

        match execute(&handle, command, config.json_snapshots).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(SessionError::Tournament(err)) => {
                logging::log_rejected_command(&line, &err.to_string());
                println!("{err}");
            }
            Err(SessionError::Closed) => {
                warn!("Tournament actor stopped");
                break;
            }
        }
    }

    let _ = handle.unsubscribe(SUBSCRIBER_ID).await;
    let _ = handle.shutdown().await;
    drop(handle);
    let _ = printer.await;

    info!("Console exiting");
    Ok(())
}

/// Run one command against the actor. Returns `false` when the console should exit.
async fn execute(
    handle: &TournamentHandle,
    command: Command,
    json: bool,
) -> Result<bool, SessionError> {
    match command {
        Command::Create(details) => {
            let name = details.name().to_string();
            handle.create(details).await?;
            println!("Registration open for {name}");
        }
        Command::Join(player) => {
            let name = player.display_name().to_string();
            match handle.join(player).await? {
                JoinOutcome::Registered => println!("{name} registered"),
                JoinOutcome::AlreadyRegistered => println!("{name} is already registered"),
                JoinOutcome::Started(round) => {
                    println!("{name} registered, bracket started with {} matches", round.len())
                }
            }
        }
        Command::Leave(player_id) => {
            let player = handle.leave(player_id).await?;
            println!("{} withdrew", player.display_name());
        }
        Command::Start => {
            let round = handle.start().await?;
            println!("Bracket started with {} matches", round.len());
        }
        Command::DeclareWinner(player_id) => match handle.declare_winner(player_id).await? {
            RoundOutcome::MatchRecorded { match_id } => println!("Match #{match_id} recorded"),
            RoundOutcome::RoundAdvanced(round) => println!("Round {} begins", round.number()),
            RoundOutcome::TournamentWon(champion) => {
                println!("{} wins the tournament!", champion.display_name())
            }
        },
        Command::Reset => {
            if handle.reset().await? {
                println!("Tournament abandoned");
            } else {
                println!("Nothing to reset");
            }
        }
        Command::Show => {
            let snapshot = handle.snapshot().await?;
            if json {
                print_json(&snapshot);
            } else {
                print!("{}", render::render_snapshot(&snapshot));
            }
        }
        Command::Json => {
            let snapshot = handle.snapshot().await?;
            print_json(&snapshot);
        }
        Command::Help => print!("{COMMANDS_HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_json(snapshot: &knockout::TournamentSnapshot) {
    match snapshot.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => warn!("Failed to serialize snapshot: {err}"),
    }
}

/// Print the bracket whenever the pairings change.
async fn print_updates(mut updates: mpsc::Receiver<SnapshotChanged>, json: bool) {
    while let Some(SnapshotChanged { cause, snapshot }) = updates.recv().await {
        match cause {
            ChangeCause::RoundStarted | ChangeCause::RoundAdvanced | ChangeCause::TournamentWon => {
                if json {
                    print_json(&snapshot);
                } else {
                    print!("{}", render::render_snapshot(&snapshot));
                }
            }
            ChangeCause::Created
            | ChangeCause::RosterChanged
            | ChangeCause::MatchRecorded
            | ChangeCause::Reset => {}
        }
    }
}
