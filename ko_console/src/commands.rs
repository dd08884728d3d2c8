use knockout::bracket::{Player, PlayerId};
use knockout::tournament::TournamentDetails;
use thiserror::Error;

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create NAME | PRIZE | FEE`
    Create(TournamentDetails),
    /// `join ID DISPLAY NAME...`
    Join(Player),
    /// `leave ID`
    Leave(PlayerId),
    /// `start`
    Start,
    /// `win ID`
    DeclareWinner(PlayerId),
    /// `reset`
    Reset,
    /// `show`
    Show,
    /// `json`
    Json,
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing was typed.
    #[error("Empty command. Type 'help' to see available commands")]
    Empty,
    /// `create` without a usable tournament name.
    #[error("Create requires a name (e.g., 'create Friday Cup | 50 credits | free')")]
    CreateMissingName,
    /// `join` without an id or display name.
    #[error("Join requires an id and a display name (e.g., 'join u1 Alice')")]
    JoinMissingFields,
    /// A command that needs a player id got none.
    #[error("'{0}' requires a player id (e.g., '{0} u1')")]
    MissingPlayerId(&'static str),
    /// Unrecognized command.
    #[error("Unrecognized command '{0}'. Type 'help' to see available commands")]
    UnrecognizedCommand(String),
}

pub const HELP: &str = "\
commands:
  create NAME | PRIZE | FEE   open registration for a new tournament
  join ID NAME                register a player (starts the bracket at the threshold)
  leave ID                    withdraw a player before the bracket starts
  start                       start the bracket with the current roster
  win ID                      declare the winner of ID's open match
  reset                       abandon the current tournament
  show                        print the bracket
  json                        print the snapshot as JSON
  help                        print this message
  quit                        exit
";

/// Parse a line of operator input into a [`Command`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_command("start"), Ok(Command::Start));
/// assert!(matches!(parse_command("join u1 Alice"), Ok(Command::Join(_))));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        "create" => parse_create(rest),
        "join" => parse_join(rest),
        "leave" => player_id(rest, "leave").map(Command::Leave),
        "win" => player_id(rest, "win").map(Command::DeclareWinner),
        "start" => Ok(Command::Start),
        "reset" => Ok(Command::Reset),
        "show" => Ok(Command::Show),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_create(rest: &str) -> Result<Command, ParseError> {
    let mut fields = rest.splitn(3, '|').map(str::trim);
    let name = fields.next().unwrap_or_default();
    let prize = fields.next().unwrap_or_default();
    let entry_fee = fields.next().unwrap_or_default();
    TournamentDetails::new(name, prize, entry_fee)
        .map(Command::Create)
        .map_err(|_| ParseError::CreateMissingName)
}

fn parse_join(rest: &str) -> Result<Command, ParseError> {
    let (id, name) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseError::JoinMissingFields)?;
    Player::new(id, name.trim())
        .map(Command::Join)
        .map_err(|_| ParseError::JoinMissingFields)
}

fn player_id(rest: &str, command: &'static str) -> Result<PlayerId, ParseError> {
    let id = rest.split_whitespace().next().unwrap_or_default();
    PlayerId::new(id).map_err(|_| ParseError::MissingPlayerId(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_commands() {
        assert_eq!(parse_command("start"), Ok(Command::Start));
        assert_eq!(parse_command("  reset  "), Ok(Command::Reset));
        assert_eq!(parse_command("SHOW"), Ok(Command::Show));
        assert_eq!(parse_command("json"), Ok(Command::Json));
        assert_eq!(parse_command("?"), Ok(Command::Help));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_create_with_all_fields() {
        let Ok(Command::Create(details)) = parse_command("create Friday Cup | 50 credits | free")
        else {
            panic!("expected create");
        };
        assert_eq!(details.name(), "Friday Cup");
        assert_eq!(details.prize(), "50 credits");
        assert_eq!(details.entry_fee(), "free");
    }

    #[test]
    fn test_create_name_only() {
        let Ok(Command::Create(details)) = parse_command("create Quick Bracket") else {
            panic!("expected create");
        };
        assert_eq!(details.name(), "Quick Bracket");
        assert_eq!(details.prize(), "");
        assert_eq!(details.entry_fee(), "");
    }

    #[test]
    fn test_create_without_name() {
        assert_eq!(parse_command("create"), Err(ParseError::CreateMissingName));
        assert_eq!(
            parse_command("create  | 10 | 1"),
            Err(ParseError::CreateMissingName)
        );
    }

    #[test]
    fn test_join_keeps_spaces_in_name() {
        let Ok(Command::Join(player)) = parse_command("join u7 Mary Ann") else {
            panic!("expected join");
        };
        assert_eq!(player.id().as_str(), "u7");
        assert_eq!(player.display_name(), "Mary Ann");
    }

    #[test]
    fn test_join_missing_name() {
        assert_eq!(parse_command("join u7"), Err(ParseError::JoinMissingFields));
        assert_eq!(parse_command("join"), Err(ParseError::JoinMissingFields));
    }

    #[test]
    fn test_win_and_leave_need_id() {
        assert_eq!(
            parse_command("win u3"),
            Ok(Command::DeclareWinner(PlayerId::new("u3").unwrap()))
        );
        assert_eq!(
            parse_command("leave u3"),
            Ok(Command::Leave(PlayerId::new("u3").unwrap()))
        );
        assert_eq!(parse_command("win"), Err(ParseError::MissingPlayerId("win")));
        assert_eq!(
            parse_command("leave "),
            Err(ParseError::MissingPlayerId("leave"))
        );
    }

    #[test]
    fn test_unrecognized_and_empty() {
        assert_eq!(parse_command(""), Err(ParseError::Empty));
        assert_eq!(
            parse_command("dance now"),
            Err(ParseError::UnrecognizedCommand("dance now".to_string()))
        );
        assert!(
            ParseError::MissingPlayerId("win")
                .to_string()
                .contains("'win u1'")
        );
    }
}
