//! Command-line driver for the engine.
//!
//! This program:
//! 1. Solves and grades boards loaded from plain-text files
//! 2. Generates new puzzles by racing several carver workers
//! 3. Runs a local generation-and-solve benchmark

use std::env;

use sudokugen::race::generate_raced;
use sudokugen::solver::{evaluate_level, search_solutions};
use sudokugen::{benchmark, io, Digit, GenerationReport, Level, SudokuBoard, Symbol};
use tracing::{error, info, Level as LogLevel};
use tracing_subscriber::FmtSubscriber;

fn main() {
    FmtSubscriber::builder()
        .with_max_level(LogLevel::INFO)
        .with_target(false)
        .with_ansi(true)
        .init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("solve") => match args.get(2) {
            Some(path) => solve_command(path),
            None => usage(),
        },
        Some("evaluate") => match args.get(2) {
            Some(path) => evaluate_command(path),
            None => usage(),
        },
        Some("generate") => generate_command(&args[2..]),
        Some("benchmark") => {
            let count = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
            info!("Running benchmark with {} boards...", count);
            match benchmark::run_benchmark(count) {
                Ok(results) => results.print_results(),
                Err(e) => error!("Benchmark failed: {}", e),
            }
        }
        _ => usage(),
    }
}

fn solve_command(path: &str) {
    let board: SudokuBoard = match io::load_from_file(path) {
        Ok(board) => board,
        Err(e) => {
            error!("Failed to load board: {}", e);
            return;
        }
    };
    print_board(&board);

    let outcome = search_solutions(&board);
    match outcome.solutions.len() {
        0 => info!("The board has no solution"),
        1 => {
            info!("The board has a unique solution:");
            print_board(&outcome.solutions[0]);
        }
        _ => {
            info!("The board has more than one solution, these are two of them:");
            print_board(&outcome.solutions[0]);
            print_board(&outcome.solutions[1]);
        }
    }
}

fn evaluate_command(path: &str) {
    match io::load_from_file::<Digit, 9>(path) {
        Ok(board) => info!("Difficulty: {}", evaluate_level(&board)),
        Err(e) => error!("Failed to load board: {}", e),
    }
}

fn generate_command(rest: &[String]) {
    let mut json = false;
    let mut out: Option<&str> = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--out" => out = iter.next().map(|s| s.as_str()),
            other => positional.push(other),
        }
    }

    let level = match positional.first() {
        Some(name) => match parse_level(name) {
            Some(level) => level,
            None => {
                error!("Unknown difficulty level: {}", name);
                return;
            }
        },
        None => Level::Medium,
    };
    let workers = positional
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4usize);

    let board = generate_raced::<Digit, 9>(level, workers);

    if json {
        let report = GenerationReport {
            rows: io::serialize(&board)
                .lines()
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            level,
            vacancies: board.vacancies(),
            workers,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to encode report: {}", e),
        }
    } else {
        info!("New board is generated ({}):", level);
        print_board(&board);
    }

    if let Some(path) = out {
        match io::save_to_file(&board, path) {
            Ok(()) => info!("Board written to {}", path),
            Err(e) => error!("Failed to write board: {}", e),
        }
    }
}

fn parse_level(name: &str) -> Option<Level> {
    match name.to_lowercase().as_str() {
        "easy" => Some(Level::Easy),
        "medium" => Some(Level::Medium),
        "hard" => Some(Level::Hard),
        "samurai" => Some(Level::Samurai),
        "extreme" => Some(Level::Extreme),
        _ => None,
    }
}

fn usage() {
    println!("Usage:");
    println!("  sudokugen solve <file>");
    println!("  sudokugen evaluate <file>");
    println!("  sudokugen generate [easy|medium|hard|samurai|extreme] [workers] [--json] [--out <file>]");
    println!("  sudokugen benchmark [count]");
}

/// Prints a board in a pretty format with grid lines. Vacant cells are
/// rendered as a dot.
fn print_board(board: &SudokuBoard) {
    println!("┌───────┬───────┬───────┐");
    for row in 0..9 {
        print!("│ ");
        for col in 0..9 {
            let cell = board[row][col];
            if cell.is_vacant() {
                print!("· ");
            } else {
                print!("{} ", cell.value().format());
            }
            if (col + 1) % 3 == 0 && col < 8 {
                print!("│ ");
            }
        }
        println!("│");
        if (row + 1) % 3 == 0 && row < 8 {
            println!("├───────┼───────┼───────┤");
        }
    }
    println!("└───────┴───────┴───────┘");
}
