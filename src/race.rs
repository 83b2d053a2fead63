//! Concurrent generation race: several workers carve puzzles toward the
//! same target level, and the first finished board wins.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::generator::BoardGenerator;
use crate::symbol::Symbol;
use crate::Level;

/// How often the coordinator checks whether a worker has finished.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

struct RaceState<S: Symbol, const W: usize> {
    winner: Option<Board<S, W>>,
    done: bool,
}

/// Shared slot for one generation request: a single winner board and a done
/// flag behind one lock. Constructed fresh per request, so nothing about
/// the race outlives it.
pub struct RaceContext<S: Symbol, const W: usize> {
    state: Mutex<RaceState<S, W>>,
}

impl<S: Symbol, const W: usize> RaceContext<S, W> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RaceState {
                winner: None,
                done: false,
            }),
        }
    }

    /// Offers a finished board. The first offer while the race is open wins
    /// and flips the done flag; every later offer is discarded.
    pub fn commit(&self, board: Board<S, W>) -> bool {
        let mut state = self.state.lock();
        if state.done {
            return false;
        }
        state.winner = Some(board);
        state.done = true;
        true
    }

    pub fn is_done(&self) -> bool {
        self.state.lock().done
    }

    pub fn take_winner(&self) -> Option<Board<S, W>> {
        self.state.lock().winner.take()
    }
}

impl<S: Symbol, const W: usize> Default for RaceContext<S, W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Races `workers` independent generator+carver runs toward `level` and
/// returns the first board committed.
///
/// Workers are fire-and-forget tasks on the rayon pool; losers keep running
/// to completion and drop their result, they are never cancelled. The
/// calling thread polls the done flag at [`POLL_INTERVAL`], reporting
/// coarse progress.
pub fn generate_raced<S: Symbol, const W: usize>(level: Level, workers: usize) -> Board<S, W> {
    let workers = workers.clamp(1, num_cpus::get().max(1));
    let context = Arc::new(RaceContext::<S, W>::new());

    for worker in 0..workers {
        let context = Arc::clone(&context);
        rayon::spawn(move || {
            let board = BoardGenerator::<S, W>::new().solvable_board(level);
            if context.commit(board) {
                debug!(worker, "worker committed the winning board");
            } else {
                trace!(worker, "worker finished after the race was decided");
            }
        });
    }
    info!(workers, ?level, "generation race started");

    let mut ticks: u32 = 0;
    while !context.is_done() {
        thread::sleep(POLL_INTERVAL);
        ticks += 1;
        if ticks % 5 == 0 {
            debug!(
                elapsed_ms = u64::from(ticks) * POLL_INTERVAL.as_millis() as u64,
                "still generating"
            );
        }
    }
    context.take_winner().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{evaluate_level, is_solution_unique};
    use crate::symbol::Digit;
    use crate::SudokuBoard;

    #[test]
    fn test_first_commit_wins() {
        let context = RaceContext::<Digit, 9>::new();
        assert!(!context.is_done());

        let mut first = SudokuBoard::new();
        first[0][0].advance();
        assert!(context.commit(first.clone()));
        assert!(context.is_done());

        // a later result is silently discarded
        assert!(!context.commit(SudokuBoard::new()));
        assert_eq!(context.take_winner(), Some(first));
    }

    #[test]
    fn test_race_produces_graded_unique_board() {
        let board = generate_raced::<Digit, 9>(Level::Easy, 4);
        assert!(is_solution_unique(&board));
        assert!(board.vacancies() > 81 * 2 / 5);
        assert_eq!(evaluate_level(&board), Level::Easy);
    }

    #[test]
    fn test_zero_workers_is_clamped_to_one() {
        let board = generate_raced::<Digit, 9>(Level::Easy, 0);
        assert!(is_solution_unique(&board));
    }
}
