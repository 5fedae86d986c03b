use game_core::prelude::*;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  n, s, e, w (or north, south, east, west)  move one cell
  take [i j]                                take a coin from the cache here (or at cell i,j)
  deposit [i j]                             leave your newest coin in the cache here (or at cell i,j)
  look                                      list caches nearby
  inventory                                 list the coins you carry
  help                                      show this message
  quit                                      leave the game";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Op(CoinOp),
    Look,
    Inventory,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command [{0}]")]
    Unknown(String),
    #[error("expected a cell as two whole numbers, got [{0}]")]
    BadCell(String),
}

/// Parses one line of player input. Blank lines are a request to look around.
pub fn parse(line: &str) -> Result<UiAction, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(UiAction::Look);
    };
    let args: Vec<&str> = words.collect();
    let action = match command.to_lowercase().as_str() {
        "n" | "north" => UiAction::Op(CoinOp::Move(Compass::North)),
        "s" | "south" => UiAction::Op(CoinOp::Move(Compass::South)),
        "e" | "east" => UiAction::Op(CoinOp::Move(Compass::East)),
        "w" | "west" => UiAction::Op(CoinOp::Move(Compass::West)),
        "take" | "t" => UiAction::Op(match parse_cell(&args)? {
            Some(cell) => CoinOp::TakeFromCache(cell),
            None => CoinOp::TakeHere,
        }),
        "deposit" | "d" => UiAction::Op(match parse_cell(&args)? {
            Some(cell) => CoinOp::DepositToCache(cell),
            None => CoinOp::DepositHere,
        }),
        "look" | "l" => UiAction::Look,
        "inventory" | "i" => UiAction::Inventory,
        "help" | "?" => UiAction::Help,
        "quit" | "q" | "exit" => UiAction::Quit,
        _ => return Err(CommandError::Unknown(command.to_string())),
    };
    Ok(action)
}

fn parse_cell(args: &[&str]) -> Result<Option<Cell>, CommandError> {
    match args {
        [] => Ok(None),
        [i, j] => {
            let bad_cell = || CommandError::BadCell(args.join(" "));
            let i = i.parse().map_err(|_| bad_cell())?;
            let j = j.parse().map_err(|_| bad_cell())?;
            Ok(Some(Cell::new(i, j)))
        },
        _ => Err(CommandError::BadCell(args.join(" "))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn movement_commands() {
        assert_eq!(Ok(UiAction::Op(CoinOp::Move(Compass::North))), parse("n"));
        assert_eq!(Ok(UiAction::Op(CoinOp::Move(Compass::West))), parse("  West "));
        assert_eq!(Ok(UiAction::Op(CoinOp::Move(Compass::East))), parse("E"));
    }

    #[test]
    fn transfer_commands_with_and_without_cells() {
        assert_eq!(Ok(UiAction::Op(CoinOp::TakeHere)), parse("take"));
        assert_eq!(
            Ok(UiAction::Op(CoinOp::TakeFromCache(Cell::new(-2, 3)))),
            parse("take -2 3")
        );
        assert_eq!(Ok(UiAction::Op(CoinOp::DepositHere)), parse("d"));
        assert_eq!(
            Ok(UiAction::Op(CoinOp::DepositToCache(Cell::new(4, 0)))),
            parse("deposit 4 0")
        );
    }

    #[test]
    fn malformed_commands_are_errors() {
        assert_eq!(Err(CommandError::Unknown("dance".to_string())), parse("dance now"));
        assert_eq!(Err(CommandError::BadCell("1".to_string())), parse("take 1"));
        assert_eq!(Err(CommandError::BadCell("x 2".to_string())), parse("deposit x 2"));
    }

    #[test]
    fn other_commands() {
        assert_eq!(Ok(UiAction::Look), parse(""));
        assert_eq!(Ok(UiAction::Inventory), parse("i"));
        assert_eq!(Ok(UiAction::Help), parse("help"));
        assert_eq!(Ok(UiAction::Quit), parse("quit"));
        assert_eq!(Ok(UiAction::Quit), parse("Exit"));
    }
}
