//! Terminal scoring of positions for the search

use crate::{
    board::{Board, Player},
    lines::has_win,
};

/// Score of a position won by the maximizing player. Any tie-break noise
/// must stay well inside this margin.
pub const WIN_SCORE: i32 = 1000;

/// The largest tie-break noise amplitude that can never turn a loss into
/// something that outranks a neutral move
pub const MAX_NOISE: i32 = WIN_SCORE / 2 - 1;

/// Scores a board from the point of view of `maximizer`: `WIN_SCORE` if it
/// owns a line, `-WIN_SCORE` if its opponent does, otherwise 0
pub fn evaluate(board: &Board, maximizer: Player) -> i32 {
    if has_win(board, maximizer).is_some() {
        WIN_SCORE
    } else if has_win(board, maximizer.opponent()).is_some() {
        -WIN_SCORE
    } else {
        0
    }
}

pub fn is_win(score: i32) -> bool {
    score >= WIN_SCORE
}

pub fn is_loss(score: i32) -> bool {
    score <= -WIN_SCORE
}
