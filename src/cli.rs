use clap::Parser;

use std::time::Duration;

use tictactoe3d::{
    config::{Difficulty, GameConfig, Mode},
    Player,
};

/// 3D tic-tac-toe on a 4x4x4 cube against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe3d", version, long_about = None)]
pub struct Cli {
    /// Difficulty of the computer: easy, difficult or insane
    #[arg(short, long, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Search depth from 1 to 8, overriding the difficulty
    #[arg(long)]
    pub depth: Option<usize>,

    /// The player who moves first
    #[arg(long, default_value = "x", value_parser = parse_player)]
    pub first: Player,

    /// The side played by the computer
    #[arg(long, default_value = "o", value_parser = parse_player)]
    pub computer: Player,

    /// Two humans play each other
    #[arg(long, conflicts_with = "watch")]
    pub two_player: bool,

    /// The computer plays both sides
    #[arg(long)]
    pub watch: bool,

    /// Seed for the computer's tie-breaking, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Amplitude of the random tie-break offset, 0 to always play the most central of equal moves
    #[arg(long, default_value_t = 50)]
    pub noise: i32,

    /// Search root moves on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Search without alpha-beta pruning (much slower, same moves)
    #[arg(long)]
    pub no_pruning: bool,

    /// Stop each computer search after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Do not show the thinking spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Start from a position: 64 cells of X, O or -, x fastest, then y, then layer
    #[arg(long)]
    pub position: Option<String>,
}

impl Cli {
    pub fn to_config(&self) -> GameConfig {
        let mode = if self.two_player {
            Mode::HumanVsHuman
        } else if self.watch {
            Mode::ComputerVsComputer
        } else {
            Mode::HumanVsComputer {
                computer: self.computer,
            }
        };
        let max_depth = self.depth.unwrap_or_else(|| self.difficulty.depth());

        GameConfig {
            mode,
            first: self.first,
            max_depth,
            noise: self.noise,
            seed: self.seed,
            parallel: self.parallel,
            pruning: !self.no_pruning,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
            show_indicator: !self.quiet,
            ..GameConfig::default()
        }
    }
}

fn parse_player(s: &str) -> Result<Player, String> {
    match s.to_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        _ => Err(format!("unknown player '{}', use x or o", s)),
    }
}
