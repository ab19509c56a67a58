//! Game and engine settings

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{board::Player, error::*, evaluate::MAX_NOISE};

/// The deepest search `GameConfig::validate` accepts, beyond which a single
/// move takes far too long to wait for
pub const MAX_DEPTH: usize = 8;

/// Search depth presets
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Difficult,
    Insane,
}

impl Difficulty {
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Difficult => 4,
            Difficulty::Insane => 6,
        }
    }
}

impl FromStr for Difficulty {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "difficult" | "hard" => Ok(Difficulty::Difficult),
            "insane" => Ok(Difficulty::Insane),
            _ => Err(CommandError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Difficult => "difficult",
            Difficulty::Insane => "insane",
        };
        write!(f, "{} (depth {})", name, self.depth())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    HumanVsHuman,
    /// The computer plays the given side
    HumanVsComputer { computer: Player },
    ComputerVsComputer,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub mode: Mode,
    /// The player who makes the first move
    pub first: Player,
    /// Plies searched after each candidate move, see [`crate::search::Searcher`]
    pub max_depth: usize,
    /// Amplitude of the random offset added to root move scores
    pub noise: i32,
    /// Seed for the tie-break noise, from the operating system if `None`
    pub seed: Option<u64>,
    pub parallel: bool,
    pub pruning: bool,
    pub time_limit: Option<Duration>,
    /// How long the computer thinks before the "thinking" indicator appears
    pub indicator_delay: Duration,
    pub show_indicator: bool,
}

impl GameConfig {
    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        self.with_depth(difficulty.depth())
    }

    pub fn is_computer(&self, player: Player) -> bool {
        match self.mode {
            Mode::HumanVsHuman => false,
            Mode::HumanVsComputer { computer } => computer == player,
            Mode::ComputerVsComputer => true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.max_depth,
                limit: MAX_DEPTH,
            });
        }
        if self.noise < 0 {
            return Err(ConfigError::NegativeNoise(self.noise));
        }
        if self.noise > MAX_NOISE {
            return Err(ConfigError::NoiseTooLarge {
                amplitude: self.noise,
                limit: MAX_NOISE,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    /// The human plays X and moves first against the computer on easy
    fn default() -> Self {
        Self {
            mode: Mode::HumanVsComputer {
                computer: Player::O,
            },
            first: Player::X,
            max_depth: Difficulty::Easy.depth(),
            noise: 50,
            seed: None,
            parallel: false,
            pruning: true,
            time_limit: None,
            indicator_delay: Duration::from_secs(2),
            show_indicator: true,
        }
    }
}
