//! Parsing of the text commands typed at the game prompt

use std::str::FromStr;

use crate::{config::Difficulty, error::CommandError};

pub const HELP: &str = "\
Commands:
  start [easy|difficult|insane|<depth>]  start a new game
  move <x> <y> <z>                       claim a cell, each axis from 1 to 4
  <x> <y> <z>                            same as move
  hint                                   ask the computer for a suggestion
  board                                  show the board
  reset                                  abandon the current game
  help                                   show this message
  exit                                   leave the program";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Starts a game, optionally with a search depth
    Start(Option<usize>),
    /// A 1-based coordinate, checked against the board when played
    Move { x: usize, y: usize, z: usize },
    Hint,
    Board,
    Reset,
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let keyword = match words.next() {
            Some(keyword) => keyword.to_lowercase(),
            None => return Err(CommandError::Unknown(String::new())),
        };
        let args: Vec<&str> = words.collect();

        match keyword.as_str() {
            "start" | "new" => match args.as_slice() {
                [] => Ok(Command::Start(None)),
                [level] => Ok(Command::Start(Some(parse_level(level)?))),
                _ => Err(CommandError::WrongArguments {
                    command: "start",
                    expected: "at most one difficulty",
                }),
            },
            "move" | "m" => parse_move(&args),
            "hint" => no_arguments(&args, "hint", Command::Hint),
            "board" | "show" => no_arguments(&args, "board", Command::Board),
            "reset" => no_arguments(&args, "reset", Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            // a bare coordinate is a move
            _ if keyword.parse::<usize>().is_ok() => {
                let all: Vec<&str> = input.split_whitespace().collect();
                parse_move(&all)
            }
            _ => Err(CommandError::Unknown(keyword)),
        }
    }
}

fn no_arguments(args: &[&str], command: &'static str, parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::WrongArguments {
            command,
            expected: "no arguments",
        })
    }
}

fn parse_move(args: &[&str]) -> Result<Command, CommandError> {
    match args {
        [x, y, z] => Ok(Command::Move {
            x: parse_number(x)?,
            y: parse_number(y)?,
            z: parse_number(z)?,
        }),
        _ => Err(CommandError::WrongArguments {
            command: "move",
            expected: "three numbers: x y z",
        }),
    }
}

fn parse_number(word: &str) -> Result<usize, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

/// A difficulty name, or a search depth given directly
fn parse_level(word: &str) -> Result<usize, CommandError> {
    match word.parse::<usize>() {
        Ok(depth) => Ok(depth),
        Err(_) => Ok(word.parse::<Difficulty>()?.depth()),
    }
}
