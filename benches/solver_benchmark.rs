use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sudokugen::generator::BoardGenerator;
use sudokugen::solver::search_solutions;
use sudokugen::{Digit, SudokuBoard};

const EASY: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

// "AI Escargot", a famously hard 9x9 instance
const HARD: [[u8; 9]; 9] = [
    [1, 0, 0, 0, 0, 7, 0, 9, 0],
    [0, 3, 0, 0, 2, 0, 0, 0, 8],
    [0, 0, 9, 6, 0, 0, 5, 0, 0],
    [0, 0, 5, 3, 0, 0, 9, 0, 0],
    [0, 1, 0, 0, 8, 0, 0, 0, 2],
    [6, 0, 0, 0, 0, 4, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 4, 0, 0, 0, 0, 0, 0, 7],
    [0, 0, 7, 0, 0, 0, 3, 0, 0],
];

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sudoku_solver");
    for (name, values) in [("easy", EASY), ("hard", HARD)] {
        let board = SudokuBoard::from_values(values);
        group.bench_with_input(BenchmarkId::new("solve", name), &board, |b, board| {
            b.iter(|| search_solutions(board))
        });
    }
    group.finish();

    c.bench_function("generate_final_board", |b| {
        let mut generator = BoardGenerator::<Digit, 9>::with_seed(17);
        b.iter(|| generator.final_board())
    });
}

criterion_group!(benches, solve_benchmark);
criterion_main!(benches);
