//! A parametric Sudoku engine.
//!
//! Boards are generic over their cell alphabet and width, so the same
//! validation, search, and generation code serves numeric 9×9 boards,
//! alphabetic and punctuation variants, and 16×16 extensions. The engine
//! covers rule checking, an iterative two-solution backtracking search,
//! randomized full-board construction, difficulty-graded carving, and a
//! multi-worker generation race.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod benchmark;
pub mod board;
pub mod cell;
pub mod generator;
pub mod io;
pub mod race;
pub mod rules;
pub mod solver;
pub mod symbol;

pub use board::Board;
pub use cell::{Cell, Position};
pub use generator::BoardGenerator;
pub use race::{generate_raced, RaceContext};
pub use symbol::{Digit, HexDigit, Letter, Punct, Symbol, WideLetter};

#[derive(Debug, Error)]
pub enum SudokuError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unrecognized cell token '{token}' at row {row}, column {col}")]
    UnrecognizedToken {
        token: String,
        row: usize,
        col: usize,
    },
    #[error("expected {expected} cell values, found {found}")]
    WrongCellCount { expected: usize, found: usize },
    #[error("no solvable board after {rebuilds} rebuilt final boards")]
    GenerationStalled { rebuilds: u32 },
    #[error("benchmark error: {0}")]
    Benchmark(String),
}

pub type Result<T> = std::result::Result<T, SudokuError>;

/// Difficulty classification, ordered from unusable to hardest.
///
/// The five graded levels carry ascending forward-step thresholds; a
/// puzzle's grade is the first level whose threshold its solve count falls
/// under, `Extreme` if none does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    NoSolution,
    NoUniqueSolution,
    Easy,
    Medium,
    Hard,
    Samurai,
    Extreme,
}

impl Level {
    pub const fn forward_step_threshold(self) -> u32 {
        match self {
            Level::NoSolution => 0,
            Level::NoUniqueSolution => 1,
            Level::Easy => 3_000,
            Level::Medium => 30_000,
            Level::Hard => 50_000,
            Level::Samurai => 500_000,
            Level::Extreme => 1_000_000,
        }
    }

    /// Whether this level names a difficulty band rather than a degenerate
    /// solution count.
    pub const fn is_graded(self) -> bool {
        matches!(
            self,
            Level::Easy | Level::Medium | Level::Hard | Level::Samurai | Level::Extreme
        )
    }

    /// Maps a search result to a level: solution count decides the
    /// degenerate cases, forward steps decide the band.
    pub fn classify(solution_count: usize, forward_steps: u32) -> Level {
        match solution_count {
            0 => Level::NoSolution,
            1 => {
                if forward_steps < Level::Easy.forward_step_threshold() {
                    Level::Easy
                } else if forward_steps < Level::Medium.forward_step_threshold() {
                    Level::Medium
                } else if forward_steps < Level::Hard.forward_step_threshold() {
                    Level::Hard
                } else if forward_steps < Level::Samurai.forward_step_threshold() {
                    Level::Samurai
                } else {
                    Level::Extreme
                }
            }
            _ => Level::NoUniqueSolution,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::NoSolution => "no solution",
            Level::NoUniqueSolution => "no unique solution",
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
            Level::Samurai => "samurai",
            Level::Extreme => "extreme",
        };
        f.write_str(name)
    }
}

/// Summary of one generation run, shaped for structured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub rows: Vec<String>,
    pub level: Level,
    pub vacancies: usize,
    pub workers: usize,
}

// The board flavors the engine ships with.
pub type SudokuBoard = Board<Digit, 9>;
pub type AlphaSudokuBoard = Board<Letter, 9>;
pub type PunctuationSudokuBoard = Board<Punct, 9>;
pub type ExtendedSudokuBoard = Board<HexDigit, 16>;
pub type ExtendedAlphaSudokuBoard = Board<WideLetter, 16>;
