//! Generation-and-solve benchmark: carves a batch of puzzles locally, solves
//! each one, and summarizes timings and difficulty distribution.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::generator::BoardGenerator;
use crate::solver::search_solutions;
use crate::symbol::Digit;
use crate::{Level, Result, SudokuError};

/// Results from a benchmark run
#[derive(Debug)]
pub struct BenchmarkResults {
    pub total_duration: Duration,
    pub average_duration: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
    pub total_boards: usize,
    pub solved_boards: usize,
    pub unique_solutions: usize,
    pub difficulty_stats: DifficultyStats,
}

/// Count of generated puzzles per difficulty band
#[derive(Debug, Default)]
pub struct DifficultyStats {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl BenchmarkResults {
    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        (self.solved_boards as f64 / self.total_boards as f64) * 100.0
    }

    /// Returns the unique solution rate as a percentage of solved boards
    pub fn unique_solution_rate(&self) -> f64 {
        (self.unique_solutions as f64 / self.solved_boards as f64) * 100.0
    }

    /// Pretty prints the benchmark results
    pub fn print_results(&self) {
        println!("\n=== Benchmark Results ===");
        println!("Total Duration: {:?}", self.total_duration);
        println!("Average Solve Duration: {:?}", self.average_duration);
        println!("Min Solve Duration: {:?}", self.min_duration);
        println!("Max Solve Duration: {:?}", self.max_duration);
        println!("Total Boards: {}", self.total_boards);
        println!(
            "Successfully Solved: {} ({:.1}%)",
            self.solved_boards,
            self.success_rate()
        );
        println!(
            "Unique Solutions: {} ({:.1}%)",
            self.unique_solutions,
            self.unique_solution_rate()
        );

        println!("\nDifficulty Distribution:");
        println!(
            "  Easy: {} ({:.1}%)",
            self.difficulty_stats.easy,
            (self.difficulty_stats.easy as f64 / self.total_boards as f64) * 100.0
        );
        println!(
            "  Medium: {} ({:.1}%)",
            self.difficulty_stats.medium,
            (self.difficulty_stats.medium as f64 / self.total_boards as f64) * 100.0
        );
        println!(
            "  Hard: {} ({:.1}%)",
            self.difficulty_stats.hard,
            (self.difficulty_stats.hard as f64 / self.total_boards as f64) * 100.0
        );
    }
}

const LEVEL_WEIGHTS: [(u32, Level); 3] = [(4, Level::Easy), (62, Level::Medium), (34, Level::Hard)];

fn weighted_level(rng: &mut SmallRng) -> Level {
    let total: u32 = LEVEL_WEIGHTS.iter().map(|&(w, _)| w).sum();
    let mut draw = rng.gen_range(0..total);
    for &(weight, level) in &LEVEL_WEIGHTS {
        if draw < weight {
            return level;
        }
        draw -= weight;
    }
    LEVEL_WEIGHTS[1].1
}

/// Carves `board_count` puzzles with weighted random difficulties and solves
/// each one, timing only the solve.
pub fn run_benchmark(board_count: usize) -> Result<BenchmarkResults> {
    if board_count == 0 {
        return Err(SudokuError::Benchmark(
            "board count must be greater than 0".to_string(),
        ));
    }

    info!("Starting benchmark with {} boards...", board_count);
    let start = Instant::now();
    let mut rng = SmallRng::from_entropy();
    let mut generator = BoardGenerator::<Digit, 9>::new();

    let mut min_duration = Duration::from_secs(u64::MAX);
    let mut max_duration = Duration::from_secs(0);
    let mut solve_duration = Duration::from_secs(0);
    let mut solved_boards = 0;
    let mut unique_solutions = 0;
    let mut difficulty_stats = DifficultyStats::default();

    for i in 0..board_count {
        let level = weighted_level(&mut rng);
        match level {
            Level::Easy => difficulty_stats.easy += 1,
            Level::Medium => difficulty_stats.medium += 1,
            _ => difficulty_stats.hard += 1,
        }
        let board = generator.solvable_board(level);
        debug!("Solving board {}/{}", i + 1, board_count);

        let solve_start = Instant::now();
        let outcome = search_solutions(&board);
        let duration = solve_start.elapsed();

        if !outcome.solutions.is_empty() {
            solved_boards += 1;
            if outcome.solutions.len() == 1 {
                unique_solutions += 1;
            }
            min_duration = min_duration.min(duration);
            max_duration = max_duration.max(duration);
            solve_duration += duration;
        } else {
            debug!("Failed to solve board {}", i + 1);
        }
    }

    Ok(BenchmarkResults {
        total_duration: start.elapsed(),
        average_duration: solve_duration / board_count as u32,
        min_duration,
        max_duration,
        total_boards: board_count,
        solved_boards,
        unique_solutions,
        difficulty_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_rejects_zero_boards() {
        match run_benchmark(0) {
            Err(SudokuError::Benchmark(_)) => (),
            other => panic!("unexpected result: {:?}", other.map(|r| r.total_boards)),
        }
    }

    #[test]
    fn test_rate_arithmetic() {
        let results = BenchmarkResults {
            total_duration: Duration::from_secs(1),
            average_duration: Duration::from_millis(10),
            min_duration: Duration::from_millis(1),
            max_duration: Duration::from_millis(20),
            total_boards: 8,
            solved_boards: 8,
            unique_solutions: 6,
            difficulty_stats: DifficultyStats::default(),
        };
        assert_eq!(results.success_rate(), 100.0);
        assert_eq!(results.unique_solution_rate(), 75.0);
    }

    #[test]
    fn test_weighted_level_is_always_graded() {
        let mut rng = SmallRng::seed_from_u64(13);
        for _ in 0..200 {
            assert!(weighted_level(&mut rng).is_graded());
        }
    }
}
