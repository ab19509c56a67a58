//! Error types returned by the engine, the driver and the command parser

use thiserror::Error;

use crate::board::Coord;

/// Errors from playing moves. Coordinates are reported 1-based, as players
/// type them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}, {z}) is outside the 4x4x4 cube")]
    OutOfRangeCoordinate { x: usize, y: usize, z: usize },
    #[error("cell ({x}, {y}, {z}) is already occupied")]
    OccupiedCellMove { x: usize, y: usize, z: usize },
    #[error("the game is over, start a new one to keep playing")]
    GameOver,
    #[error("it is the computer's turn")]
    NotHumanTurn,
    #[error("no game in progress, use 'start' to begin one")]
    NoActiveGame,
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

impl GameError {
    pub(crate) fn out_of_range(coord: Coord) -> Self {
        GameError::OutOfRangeCoordinate {
            x: coord.x.saturating_add(1),
            y: coord.y.saturating_add(1),
            z: coord.z.saturating_add(1),
        }
    }

    pub(crate) fn occupied(coord: Coord) -> Self {
        let (x, y, z) = coord.one_based();
        GameError::OccupiedCellMove { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list of commands")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    WrongArguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("could not parse '{0}' as a number")]
    InvalidNumber(String),
    #[error("unknown difficulty '{0}', use easy, difficult, insane or a search depth")]
    InvalidDifficulty(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("search depth {depth} is too deep, the limit is {limit}")]
    DepthTooLarge { depth: usize, limit: usize },
    #[error("noise amplitude {amplitude} must not exceed {limit} so wins and losses always dominate")]
    NoiseTooLarge { amplitude: i32, limit: i32 },
    #[error("noise amplitude must not be negative, got {0}")]
    NegativeNoise(i32),
}

/// Any error from running a command against a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
