use thiserror::Error;
use tile_blast_core::{BoosterKind, Position};
use tile_blast_system_gameplay::Request;

/// Help text listing every accepted input line.
pub(crate) const HELP: &str = "\
commands:
  <x> <y> | click <x> <y>   click the tile at column x, row y
  bomb | teleport           arm a booster
  cancel                    disarm the armed booster
  shuffle                   regenerate the field
  new                       start a new game
  help                      show this message
  quit                      leave the game";

/// Parsed player input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Request forwarded to the gameplay router.
    Request(Request),
    /// Starts a new game with the session configuration.
    NewGame,
    /// Prints the help text.
    Help,
    /// Ends the session.
    Quit,
}

/// Reasons an input line could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ParseError {
    /// The line held no words.
    #[error("type a command, or `help` for the list")]
    Empty,
    /// The first word is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A click was missing one of its coordinates.
    #[error("a click needs both a column and a row")]
    MissingCoordinate,
    /// A coordinate was not a non-negative integer.
    #[error("`{0}` is not a valid coordinate")]
    InvalidCoordinate(String),
    /// Extra words followed a complete command.
    #[error("unexpected input after command: `{0}`")]
    TrailingInput(String),
}

/// Parses one line typed by the player.
pub(crate) fn parse(line: &str) -> Result<Input, ParseError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(ParseError::Empty);
    };

    let input = match first.to_ascii_lowercase().as_str() {
        "click" => {
            let x = coordinate(words.next())?;
            let y = coordinate(words.next())?;
            click(x, y)
        }
        "bomb" => booster(BoosterKind::Bomb),
        "teleport" => booster(BoosterKind::Teleport),
        "cancel" => Input::Request(Request::CancelBooster),
        "shuffle" => Input::Request(Request::Shuffle),
        "new" => Input::NewGame,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other if other.parse::<u32>().is_ok() => {
            let x = coordinate(Some(first))?;
            let y = coordinate(words.next())?;
            click(x, y)
        }
        other => return Err(ParseError::UnknownCommand(other.to_owned())),
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(ParseError::TrailingInput(rest.join(" ")));
    }
    Ok(input)
}

fn coordinate(word: Option<&str>) -> Result<u32, ParseError> {
    let word = word.ok_or(ParseError::MissingCoordinate)?;
    word.parse()
        .map_err(|_| ParseError::InvalidCoordinate(word.to_owned()))
}

fn click(x: u32, y: u32) -> Input {
    Input::Request(Request::TileClicked {
        position: Position::new(x, y),
    })
}

fn booster(kind: BoosterKind) -> Input {
    Input::Request(Request::ActivateBooster { kind })
}

#[cfg(test)]
mod tests {
    use super::{parse, Input, ParseError};
    use tile_blast_core::{BoosterKind, Position};
    use tile_blast_system_gameplay::Request;

    fn clicked(x: u32, y: u32) -> Input {
        Input::Request(Request::TileClicked {
            position: Position::new(x, y),
        })
    }

    #[test]
    fn bare_coordinates_and_click_prefix_agree() {
        assert_eq!(parse("3 4"), Ok(clicked(3, 4)));
        assert_eq!(parse("  click 3   4 "), Ok(clicked(3, 4)));
        assert_eq!(parse("CLICK 0 7"), Ok(clicked(0, 7)));
    }

    #[test]
    fn keywords_map_to_requests() {
        assert_eq!(
            parse("bomb"),
            Ok(Input::Request(Request::ActivateBooster {
                kind: BoosterKind::Bomb,
            }))
        );
        assert_eq!(
            parse("teleport"),
            Ok(Input::Request(Request::ActivateBooster {
                kind: BoosterKind::Teleport,
            }))
        );
        assert_eq!(parse("cancel"), Ok(Input::Request(Request::CancelBooster)));
        assert_eq!(parse("shuffle"), Ok(Input::Request(Request::Shuffle)));
        assert_eq!(parse("new"), Ok(Input::NewGame));
        assert_eq!(parse("quit"), Ok(Input::Quit));
        assert_eq!(parse("?"), Ok(Input::Help));
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("click 2"), Err(ParseError::MissingCoordinate));
        assert_eq!(
            parse("click 2 -1"),
            Err(ParseError::InvalidCoordinate("-1".to_owned()))
        );
        assert_eq!(
            parse("jump"),
            Err(ParseError::UnknownCommand("jump".to_owned()))
        );
        assert_eq!(
            parse("bomb now"),
            Err(ParseError::TrailingInput("now".to_owned()))
        );
    }
}
