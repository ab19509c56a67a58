//! A game engine and computer opponent for 3D tic-tac-toe on a 4x4x4 cube
//!
//! Players take turns claiming cells; the first to own every cell of one of
//! the 76 winning lines (rows, columns, pillars, slice diagonals and space
//! diagonals) wins. The computer opponent uses a depth-limited minimax
//! search with alpha-beta pruning, centre-first move ordering and iterative
//! deepening.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe3d::{board::Board, search::{Searcher, TieBreak}, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! let mut searcher = Searcher::new(Player::O, 2).with_tie_break(TieBreak::none());
//! let result = searcher.search(&mut board).expect("the board has empty cells");
//!
//! // the centre of the cube is always preferred on an empty board
//! assert!(result.best_move.is_central());
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod lines;

pub mod evaluate;

pub mod search;

pub mod thinking;

pub mod config;

pub mod error;

pub mod game;

pub mod command;

pub mod session;


pub use board::{Cell, Coord, Player};

/// The side length of the cube in cells
pub const SIZE: usize = 4;

/// The number of cells in the cube
pub const CELLS: usize = SIZE * SIZE * SIZE;

// ensure that the cube fits in a u64 for the bitboard representation
const_assert!(CELLS <= 64);
