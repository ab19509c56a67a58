//! Turn order, move validation and game-over detection

use tracing::info;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    board::{Board, Coord, Player},
    config::GameConfig,
    error::GameError,
    lines::{has_win, winning_line_through, Line},
    search::{SearchResult, Searcher},
    thinking::ThinkingIndicator,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    Playing,
    Won {
        winner: Player,
        line: &'static Line,
    },
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing)
    }
}

/// A move chosen and played by the computer
#[derive(Clone, Debug)]
pub struct ComputerMove {
    pub player: Player,
    pub coord: Coord,
    pub search: SearchResult,
    pub state: GameState,
}

/// One game from the first move to a win or draw
///
/// The game owns its board. Searches borrow it as scratch space and always
/// hand it back unchanged; only [`Game::play`] and the methods built on it
/// commit moves.
pub struct Game {
    board: Board,
    config: GameConfig,
    to_move: Player,
    state: GameState,
    history: Vec<(Player, Coord)>,
    // one searcher per side, so each keeps its own tie-break sequence
    searchers: (Searcher, Searcher),
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let abort = Arc::new(AtomicBool::new(false));
        let mut o_config = config.clone();
        o_config.seed = config.seed.map(|seed| seed.wrapping_add(1));
        let searchers = (
            Searcher::from_config(Player::X, &config).with_abort_flag(Arc::clone(&abort)),
            Searcher::from_config(Player::O, &o_config).with_abort_flag(abort),
        );

        Self {
            board: Board::new(),
            to_move: config.first,
            config,
            state: GameState::Playing,
            history: Vec::new(),
            searchers,
        }
    }

    /// Continues a game from a position, working out who moved last from
    /// the number of cells each player holds
    ///
    /// A won position must have been won by the player who moved last.
    pub fn from_board(config: GameConfig, board: Board) -> Result<Self, GameError> {
        let first = config.first;
        let (first_count, second_count) = (board.count(first), board.count(first.opponent()));
        // on an empty board this is the player before the first move
        let last_mover = if first_count == second_count {
            first.opponent()
        } else if first_count == second_count + 1 {
            first
        } else {
            return Err(GameError::InvalidLayout(format!(
                "{} has {} cells and {} has {}, which no game can reach",
                first,
                first_count,
                first.opponent(),
                second_count
            )));
        };

        let state = match (has_win(&board, Player::X), has_win(&board, Player::O)) {
            (Some(_), Some(_)) => {
                return Err(GameError::InvalidLayout(
                    "both players own a complete line".to_string(),
                ))
            }
            (Some(line), None) => GameState::Won {
                winner: Player::X,
                line,
            },
            (None, Some(line)) => GameState::Won {
                winner: Player::O,
                line,
            },
            (None, None) if board.is_full() => GameState::Draw,
            (None, None) => GameState::Playing,
        };

        // a finished game keeps the final mover, as `play` does
        let to_move = match &state {
            GameState::Won { winner, .. } if *winner != last_mover => {
                return Err(GameError::InvalidLayout(format!(
                    "{} owns a line but {} made the last move",
                    winner, last_mover
                )))
            }
            GameState::Playing => last_mover.opponent(),
            _ => last_mover,
        };

        let mut game = Self::new(config);
        game.board = board;
        game.to_move = to_move;
        game.state = state;
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player whose turn it is, or who made the final move
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[(Player, Coord)] {
        &self.history
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_over() && self.config.is_computer(self.to_move)
    }

    /// The flag that stops a computer move in progress
    ///
    /// Setting it before a search starts cancels that next search instead.
    /// The game clears the flag once the cancelled search has returned, so
    /// it only ever stops one move.
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        self.searchers.0.abort_flag()
    }

    /// Plays a human move for the player to move
    pub fn play_human(&mut self, coord: Coord) -> Result<GameState, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        if self.config.is_computer(self.to_move) {
            return Err(GameError::NotHumanTurn);
        }
        self.play(coord)
    }

    /// Searches for and plays a move for the player to move
    pub fn play_computer(&mut self) -> Result<ComputerMove, GameError> {
        let player = self.to_move;
        let search = self.search_for(player)?;
        let state = self.play(search.best_move)?;

        Ok(ComputerMove {
            player,
            coord: search.best_move,
            search,
            state,
        })
    }

    /// Searches for the best move of the player to move without playing it
    pub fn suggest(&mut self) -> Result<SearchResult, GameError> {
        self.search_for(self.to_move)
    }

    /// Commits a move for the player to move and updates the game state
    pub fn play(&mut self, coord: Coord) -> Result<GameState, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.is_empty(coord)? {
            return Err(GameError::occupied(coord));
        }

        let player = self.to_move;
        self.board.set_cell(coord, player.cell())?;
        self.history.push((player, coord));
        info!(player = %player, coord = %coord, "move played");

        // only lines through the new cell can have been completed
        self.state = if let Some(line) = winning_line_through(&self.board, player, coord) {
            info!(winner = %player, "game won");
            GameState::Won {
                winner: player,
                line,
            }
        } else if self.board.is_full() {
            info!("game drawn");
            GameState::Draw
        } else {
            self.to_move = player.opponent();
            GameState::Playing
        };

        Ok(self.state.clone())
    }

    fn search_for(&mut self, player: Player) -> Result<SearchResult, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let searcher = match player {
            Player::X => &mut self.searchers.0,
            Player::O => &mut self.searchers.1,
        };

        let indicator =
            ThinkingIndicator::start(self.config.indicator_delay, self.config.show_indicator);
        let search = searcher.search(&mut self.board);
        // the spinner must be gone before anything is printed
        indicator.finish();
        searcher.abort_flag().store(false, Ordering::Relaxed);

        // a game still in play always has an empty cell
        search.ok_or(GameError::GameOver)
    }
}
