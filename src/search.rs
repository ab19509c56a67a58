//! An agent to choose moves by depth-limited game tree search

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use crate::{
    board::{Board, Coord, Move, Player},
    config::GameConfig,
    evaluate::*,
};

/// Bound on every score the tree search can produce
const INFINITY: i32 = WIN_SCORE + 1;

/// How many nodes are searched between checks of the time limit
const DEADLINE_POLL_INTERVAL: usize = 1024;

/// Randomness used to choose between equally good root moves
///
/// Each candidate's score is shifted once by a uniform offset in
/// `-amplitude..=amplitude`, and the highest shifted score among the equally
/// scored, equally central candidates is played. The amplitude is clamped to
/// [`MAX_NOISE`] so a lost position can never outrank a neutral one.
#[derive(Clone, Debug)]
pub struct TieBreak {
    amplitude: i32,
    rng: ChaCha8Rng,
}

impl TieBreak {
    /// No noise: ties go to the most central candidate
    pub fn none() -> Self {
        Self::seeded(0, 0)
    }

    /// Reproducible noise from a fixed seed
    pub fn seeded(amplitude: i32, seed: u64) -> Self {
        Self {
            amplitude: amplitude.clamp(0, MAX_NOISE),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Noise seeded from the operating system
    pub fn from_entropy(amplitude: i32) -> Self {
        Self {
            amplitude: amplitude.clamp(0, MAX_NOISE),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn amplitude(&self) -> i32 {
        self.amplitude
    }

    pub fn perturb(&mut self, score: i32) -> i32 {
        if self.amplitude == 0 {
            score
        } else {
            score + self.rng.gen_range(-self.amplitude..=self.amplitude)
        }
    }
}

impl Default for TieBreak {
    fn default() -> Self {
        Self::none()
    }
}

/// What the score of a search says about the rest of the game
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outlook {
    /// The searching player wins within at most `moves` of its own moves
    Win { moves: usize },
    /// The opponent wins within at most `moves` of its moves
    Loss { moves: usize },
    /// No forced result within the search horizon
    Unclear,
}

/// The outcome of one call to [`Searcher::search`]
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Coord,
    /// Score of `best_move` at the deepest completed depth, without noise
    pub score: i32,
    /// Deepest completed iteration, 0 if the search was stopped before the first
    pub depth: usize,
    pub node_count: usize,
    pub elapsed: Duration,
    /// Whether the abort flag or time limit cut the search short
    pub aborted: bool,
}

impl SearchResult {
    pub fn outlook(&self) -> Outlook {
        // the root move is followed by `depth` plies, alternating from the opponent
        if is_win(self.score) {
            Outlook::Win {
                moves: 1 + self.depth / 2,
            }
        } else if is_loss(self.score) {
            Outlook::Loss {
                moves: (self.depth + 1) / 2,
            }
        } else {
            Outlook::Unclear
        }
    }
}

/// A minimax searcher with alpha-beta pruning
///
/// # Notes
/// Positions are scored only by wins and losses (see [`evaluate`]), so the
/// search finds forced wins and avoids forced losses within its horizon and
/// otherwise relies on centre-first move ordering and tie-break noise.
///
/// `max_depth` counts the plies searched after each candidate root move:
/// a depth of 1 considers every reply of the opponent.
///
/// # Cancellation
/// The abort flag is checked on entry to every node. Once it is set, nodes
/// return the best score found so far and the unfinished iteration of the
/// iterative deepening is discarded.
#[derive(Clone)]
pub struct Searcher {
    maximizer: Player,
    max_depth: usize,
    pruning: bool,
    parallel: bool,
    time_limit: Option<Duration>,
    tie_break: TieBreak,
    abort: Arc<AtomicBool>,
    deadline: Option<Instant>,
    timed_out: bool,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a `Searcher` playing for `maximizer`, without tie-break noise
    pub fn new(maximizer: Player, max_depth: usize) -> Self {
        Self {
            maximizer,
            max_depth,
            pruning: true,
            parallel: false,
            time_limit: None,
            tie_break: TieBreak::none(),
            abort: Arc::new(AtomicBool::new(false)),
            deadline: None,
            timed_out: false,
            node_count: 0,
        }
    }

    /// Creates a `Searcher` with the engine settings of a game configuration
    pub fn from_config(maximizer: Player, config: &GameConfig) -> Self {
        let tie_break = match config.seed {
            Some(seed) => TieBreak::seeded(config.noise, seed),
            None => TieBreak::from_entropy(config.noise),
        };
        Self::new(maximizer, config.max_depth)
            .with_tie_break(tie_break)
            .with_pruning(config.pruning)
            .with_parallel(config.parallel)
            .with_time_limit(config.time_limit)
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Disabling pruning turns the search into exhaustive minimax
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Searches the root moves on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Shares an existing abort flag with this `Searcher`
    pub fn with_abort_flag(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = abort;
        self
    }

    /// The flag that stops a running search once set
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Chooses a move for the maximizing player with iterative deepening
    ///
    /// The board is used as scratch space and is restored before returning.
    /// Returns `None` if the board has no empty cells.
    pub fn search(&mut self, board: &mut Board) -> Option<SearchResult> {
        // falls back to the most central cell if the first iteration is cut short
        let first = board.candidate_moves().next()?;
        let start = Instant::now();

        self.node_count = 0;
        self.timed_out = false;
        self.deadline = self.time_limit.map(|limit| start + limit);

        let mut result = SearchResult {
            best_move: first.coord,
            score: 0,
            depth: 0,
            node_count: 0,
            elapsed: Duration::default(),
            aborted: false,
        };

        for depth in 1..=self.max_depth {
            let scored = match self.score_root_moves(board, depth) {
                Some(scored) => scored,
                None => {
                    warn!(
                        depth,
                        timed_out = self.timed_out,
                        "search stopped early, keeping the last completed depth"
                    );
                    result.aborted = true;
                    break;
                }
            };
            let (choice, score) = match self.choose(&scored) {
                Some(choice) => choice,
                None => break,
            };

            // every move loses now, keep the choice that held out longest
            if is_loss(score) && result.depth > 0 {
                debug!(depth, "all moves lose, keeping the previous depth");
                break;
            }

            result.best_move = choice.coord;
            result.score = score;
            result.depth = depth;
            debug!(
                depth,
                best_move = %choice.coord,
                score,
                nodes = self.node_count,
                "completed search depth"
            );

            // a deeper search cannot change a forced result
            if is_win(score) || is_loss(score) {
                break;
            }
        }

        result.node_count = self.node_count;
        result.elapsed = start.elapsed();
        Some(result)
    }

    /// Scores every root move at one search depth, in move order
    ///
    /// Scoring stops after the first winning move. Returns `None` if the
    /// search was stopped before all moves were scored.
    pub fn score_root_moves(&mut self, board: &mut Board, max_depth: usize) -> Option<Vec<(Move, i32)>> {
        if self.parallel {
            return self.score_root_moves_parallel(board, max_depth);
        }

        let mut scored = Vec::new();
        for candidate in board.candidate_moves() {
            board.play(candidate.coord, self.maximizer);
            let score = self.minimax(board, 0, false, -INFINITY, INFINITY, max_depth);
            board.undo(candidate.coord);

            if self.should_stop() {
                return None;
            }
            scored.push((candidate, score));
            if is_win(score) {
                break;
            }
        }
        Some(scored)
    }

    // each worker searches a private copy of the board with a full window,
    // so the scores match the sequential search exactly
    fn score_root_moves_parallel(&mut self, board: &Board, max_depth: usize) -> Option<Vec<(Move, i32)>> {
        let position = *board;
        let candidates: Vec<Move> = position.candidate_moves().collect();
        let searcher = &*self;

        let results: Vec<(Move, i32, usize, bool)> = candidates
            .par_iter()
            .map(|&candidate| {
                let mut worker = searcher.clone();
                worker.node_count = 0;

                let mut board = position;
                board.play(candidate.coord, worker.maximizer);
                let score = worker.minimax(&mut board, 0, false, -INFINITY, INFINITY, max_depth);
                (candidate, score, worker.node_count, worker.should_stop())
            })
            .collect();

        let mut scored = Vec::with_capacity(results.len());
        let mut stopped = false;
        for (candidate, score, nodes, worker_stopped) in results {
            self.node_count += nodes;
            stopped |= worker_stopped;
            if !stopped {
                scored.push((candidate, score));
            }
        }
        if stopped || self.abort.load(Ordering::Relaxed) {
            self.timed_out |= self.deadline.map_or(false, |d| Instant::now() >= d);
            return None;
        }
        // match the sequential search, which stops at the first win
        if let Some(win) = scored.iter().position(|&(_, score)| is_win(score)) {
            scored.truncate(win + 1);
        }
        Some(scored)
    }

    /// Picks a root move and returns it with its raw score
    ///
    /// Any win is taken outright. Otherwise only the most central of the
    /// moves with the best raw score are eligible, and tie-break noise
    /// decides between those.
    fn choose(&mut self, scored: &[(Move, i32)]) -> Option<(Move, i32)> {
        if let Some(&win) = scored.iter().find(|&&(_, score)| is_win(score)) {
            return Some(win);
        }
        let best_score = scored.iter().map(|&(_, score)| score).max()?;
        let best_priority = scored
            .iter()
            .filter(|&&(_, score)| score == best_score)
            .map(|&(candidate, _)| candidate.priority)
            .max()?;

        let mut best: Option<(Move, i32, i32)> = None;
        for &(candidate, score) in scored {
            // one draw per candidate in move order, eligible or not
            let perturbed = self.tie_break.perturb(score);
            if score != best_score || candidate.priority != best_priority {
                continue;
            }
            if best.map_or(true, |(_, _, best_perturbed)| perturbed > best_perturbed) {
                best = Some((candidate, score, perturbed));
            }
        }
        best.map(|(candidate, score, _)| (candidate, score))
    }

    /// Performs game tree search below a root move
    ///
    /// Returns the score of the position for the maximizing player. Every
    /// trial move is undone before returning, including after a cutoff.
    pub(crate) fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        max_depth: usize,
    ) -> i32 {
        self.node_count += 1;

        let score = evaluate(board, self.maximizer);
        if score != 0 || board.is_full() || depth >= max_depth || self.should_stop() {
            return score;
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for candidate in board.candidate_moves() {
            if self.should_stop() {
                break;
            }

            board.play(candidate.coord, mover);
            let current = self.minimax(board, depth + 1, !maximizing, alpha, beta, max_depth);
            board.undo(candidate.coord);

            if maximizing {
                best = best.max(current);
                alpha = alpha.max(best);
            } else {
                best = best.min(current);
                beta = beta.min(best);
            }
            // the other player will never allow this branch
            if self.pruning && beta <= alpha {
                break;
            }
        }

        // stopped before any reply was scored
        if best.abs() == INFINITY {
            0
        } else {
            best
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.timed_out || self.abort.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.node_count % DEADLINE_POLL_INTERVAL == 0 && Instant::now() >= deadline {
                self.timed_out = true;
                return true;
            }
        }
        false
    }
}
