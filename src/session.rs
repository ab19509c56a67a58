//! The state behind the command prompt: at most one game at a time

use tracing::trace;

use crate::{
    board::{Coord, Player},
    command::Command,
    config::GameConfig,
    error::{GameError, SessionError},
    game::{ComputerMove, Game, GameState},
    search::SearchResult,
};

/// What happened in response to a command, for the caller to display
#[derive(Clone, Debug)]
pub enum Event {
    Started { depth: usize },
    Moved {
        player: Player,
        coord: Coord,
        state: GameState,
    },
    ComputerMoved(ComputerMove),
    Hint(SearchResult),
    ShowBoard,
    Reset { had_game: bool },
    Help,
    Exit,
}

/// A command-line session
///
/// Games are created by [`Session::start`] and dropped by
/// [`Session::reset`] or by starting another.
pub struct Session {
    defaults: GameConfig,
    game: Option<Game>,
}

impl Session {
    pub fn new(defaults: GameConfig) -> Self {
        Self {
            defaults,
            game: None,
        }
    }

    pub fn defaults(&self) -> &GameConfig {
        &self.defaults
    }

    /// Starts a new game, replacing any game in progress
    pub fn start(&mut self, depth: Option<usize>) -> Result<&mut Game, SessionError> {
        let mut config = self.defaults.clone();
        if let Some(depth) = depth {
            config = config.with_depth(depth);
        }
        config.validate()?;

        Ok(self.game.insert(Game::new(config)))
    }

    /// Starts a game from an existing position
    pub fn start_from(&mut self, game: Game) -> Result<&mut Game, SessionError> {
        game.config().validate()?;
        Ok(self.game.insert(game))
    }

    /// Drops the current game, returning whether there was one
    pub fn reset(&mut self) -> bool {
        self.game.take().is_some()
    }

    pub fn game(&self) -> Result<&Game, GameError> {
        self.game.as_ref().ok_or(GameError::NoActiveGame)
    }

    pub fn game_mut(&mut self) -> Result<&mut Game, GameError> {
        self.game.as_mut().ok_or(GameError::NoActiveGame)
    }

    /// Whether the computer should move next
    pub fn computer_to_move(&self) -> bool {
        self.game.as_ref().map_or(false, Game::is_computer_turn)
    }

    pub fn play_computer(&mut self) -> Result<Event, SessionError> {
        Ok(Event::ComputerMoved(self.game_mut()?.play_computer()?))
    }

    /// Runs one command. Computer replies are left to the caller, see
    /// [`Session::computer_to_move`].
    pub fn execute(&mut self, command: Command) -> Result<Event, SessionError> {
        trace!(?command, "executing command");

        match command {
            Command::Start(depth) => {
                let game = self.start(depth)?;
                Ok(Event::Started {
                    depth: game.config().max_depth,
                })
            }
            Command::Move { x, y, z } => {
                let coord = Coord::from_one_based(x, y, z)?;
                let game = self.game_mut()?;
                let player = game.to_move();
                let state = game.play_human(coord)?;
                Ok(Event::Moved {
                    player,
                    coord,
                    state,
                })
            }
            Command::Hint => Ok(Event::Hint(self.game_mut()?.suggest()?)),
            Command::Board => {
                self.game()?;
                Ok(Event::ShowBoard)
            }
            Command::Reset => Ok(Event::Reset {
                had_game: self.reset(),
            }),
            Command::Help => Ok(Event::Help),
            Command::Exit => Ok(Event::Exit),
        }
    }
}
