//! Randomized board construction and difficulty-graded carving.

use std::marker::PhantomData;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::board::Board;
use crate::rules::{is_board_solved, is_board_valid};
use crate::solver::{evaluate_level, is_solution_unique};
use crate::symbol::Symbol;
use crate::{Level, Result, SudokuError};

/// Produces complete boards, random boards, and solvable puzzles.
pub struct BoardGenerator<S: Symbol, const W: usize> {
    rng: SmallRng,
    _symbol: PhantomData<S>,
}

impl<S: Symbol, const W: usize> BoardGenerator<S, W> {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            _symbol: PhantomData,
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            _symbol: PhantomData,
        }
    }

    /// Builds a complete, valid, vacancy-free board.
    ///
    /// Each cell keeps a candidate list seeded with the full alphabet. The
    /// cursor walks the grid in row-major order, trying random candidates;
    /// a rejected candidate leaves its list for good. When a list runs dry
    /// the cursor backs up one cell, retracting the value committed there
    /// so it won't be retried. Every rejection permanently shrinks some
    /// list, which bounds the total work.
    pub fn final_board(&mut self) -> Board<S, W> {
        let full_alphabet: Vec<S> = {
            let mut values = Vec::with_capacity(S::ALPHABET);
            let mut value = S::MIN;
            for _ in 0..S::ALPHABET {
                values.push(value);
                value = value.succ();
            }
            values
        };
        let mut candidates: Vec<Vec<S>> = vec![full_alphabet.clone(); W * W];
        let mut board = Board::new();
        let mut pos = 0usize;

        while !is_board_solved(&board) && pos < W * W {
            let (row, col) = (pos / W, pos % W);
            while !candidates[pos].is_empty() {
                let pick = self.rng.gen_range(0..candidates[pos].len());
                board[row][col].set(candidates[pos][pick]);
                if is_board_valid(&board, false) {
                    break;
                }
                candidates[pos].swap_remove(pick);
                board[row][col].reset();
            }
            if candidates[pos].is_empty() {
                // dead end: restore this cell's list and retract the value
                // committed one cell back
                board[row][col].reset();
                candidates[pos] = full_alphabet.clone();
                debug_assert!(pos > 0);
                let prev = pos - 1;
                let prev_value = board[prev / W][prev % W].value();
                if let Some(at) = candidates[prev].iter().position(|&v| v == prev_value) {
                    candidates[prev].swap_remove(at);
                }
                trace!(pos, "candidate list exhausted, backing up");
                pos = prev;
            } else {
                pos += 1;
            }
        }
        board
    }

    /// A final board with a random number of cells vacated. Solution
    /// uniqueness is not preserved; useful for exercising the solver's
    /// ambiguity detection.
    pub fn random_board(&mut self) -> Board<S, W> {
        let mut board = self.final_board();
        let holes = self.rng.gen_range(0..W * W);
        for _ in 0..holes {
            let index = self.rng.gen_range(0..W * W);
            board[index / W][index % W].reset();
        }
        board
    }

    /// Carves a puzzle of exactly `level` difficulty out of fresh final
    /// boards, retrying forever on adversarial randomness. A target below
    /// the easiest graded level yields a blank board.
    pub fn solvable_board(&mut self, level: Level) -> Board<S, W> {
        if !level.is_graded() {
            return Board::new();
        }
        let mut rebuilds: u32 = 0;
        loop {
            if let Some(board) = self.carve_attempt(level, W * W * 2 / 5) {
                debug!(rebuilds, ?level, "carved a solvable board");
                return board;
            }
            rebuilds += 1;
            trace!(rebuilds, "carve stalled, requesting a fresh final board");
        }
    }

    /// Bounded variant of [`solvable_board`](BoardGenerator::solvable_board):
    /// gives up with [`SudokuError::GenerationStalled`] once `max_rebuilds`
    /// fresh final boards have failed to carve.
    pub fn try_solvable_board(
        &mut self,
        level: Level,
        min_vacancies: usize,
        max_rebuilds: u32,
    ) -> Result<Board<S, W>> {
        if !level.is_graded() {
            return Ok(Board::new());
        }
        let mut rebuilds: u32 = 0;
        loop {
            if let Some(board) = self.carve_attempt(level, min_vacancies) {
                return Ok(board);
            }
            rebuilds += 1;
            if rebuilds > max_rebuilds {
                return Err(SudokuError::GenerationStalled { rebuilds });
            }
        }
    }

    /// One carving pass over one final board. Empties random filled cells,
    /// keeping each removal only if the solution stays unique, until the
    /// vacancy minimum is exceeded and the difficulty matches exactly.
    /// Returns `None` once the consecutive-failure bound (1.5× the cell
    /// count) is hit without converging.
    fn carve_attempt(&mut self, level: Level, min_vacancies: usize) -> Option<Board<S, W>> {
        let retry_bound = W * W * 3 / 2;
        let mut board = self.final_board();
        let mut vacancies = 0usize;
        let mut retries = 0usize;
        loop {
            let index = self.rng.gen_range(0..W * W);
            let (row, col) = (index / W, index % W);
            if board[row][col].is_vacant() {
                continue;
            }
            let value = board[row][col].value();
            board[row][col].reset();

            if is_solution_unique(&board) {
                vacancies += 1;
                retries = 0;
                if vacancies > min_vacancies && evaluate_level(&board) == level {
                    return Some(board);
                }
            } else {
                retries += 1;
                board[row][col].set(value);
            }
            if retries > retry_bound {
                return None;
            }
        }
    }
}

impl<S: Symbol, const W: usize> Default for BoardGenerator<S, W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::search_solutions;
    use crate::symbol::Digit;

    #[test]
    fn test_final_board_is_solved() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(7);
        for _ in 0..5 {
            let board = generator.final_board();
            assert!(is_board_solved(&board));
            assert_eq!(board.vacancies(), 0);
        }
    }

    #[test]
    fn test_final_boards_vary() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(11);
        let first = generator.final_board();
        let second = generator.final_board();
        assert_ne!(first, second);
    }

    #[test]
    fn test_ungraded_target_yields_blank_board() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(1);
        let board = generator.solvable_board(Level::NoUniqueSolution);
        assert_eq!(board.vacancies(), 81);
    }

    #[test]
    fn test_carved_board_is_unique_and_graded() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(42);
        let board = generator.solvable_board(Level::Easy);
        assert!(is_solution_unique(&board));
        assert!(board.vacancies() > 81 * 2 / 5);
        assert_eq!(evaluate_level(&board), Level::Easy);
    }

    #[test]
    fn test_carved_board_keeps_solution_of_search() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(42);
        let board = generator.solvable_board(Level::Easy);
        let outcome = search_solutions(&board);
        assert_eq!(outcome.solutions.len(), 1);
        assert!(is_board_solved(&outcome.solutions[0]));
    }

    #[test]
    fn test_impossible_vacancy_target_stalls() {
        // 70 vacancies means 11 clues, far below what uniqueness allows
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(5);
        let result = generator.try_solvable_board(Level::Easy, 70, 0);
        assert!(matches!(
            result,
            Err(SudokuError::GenerationStalled { .. })
        ));
    }

    #[test]
    fn test_random_board_stays_valid() {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(9);
        let board = generator.random_board();
        assert!(is_board_valid(&board, false));
    }
}
