use clap::Parser;
use klotski_solver::codec::StateCodec;
use klotski_solver::engine::{Board, Shape, CLASSIC_GOAL};
use klotski_solver::solver::solve;
use klotski_solver::utils::board_from_str_array;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (one row per line, '.' for empty cells).
    /// When omitted, the classic layout is solved instead.
    board_file: Option<PathBuf>,

    /// Label of the goal piece in the board file (defaults to the first 2x2 piece)
    #[clap(long)]
    goal_piece: Option<char>,

    /// Goal row for the goal piece's top-left cell
    #[clap(long, default_value_t = CLASSIC_GOAL.0)]
    goal_row: usize,

    /// Goal column for the goal piece's top-left cell
    #[clap(long, default_value_t = CLASSIC_GOAL.1)]
    goal_col: usize,

    /// Scramble the starting board with this many random moves before solving
    #[clap(long, default_value_t = 0)]
    scramble: usize,

    /// Seed for the scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

fn read_board_file(path: &PathBuf, args: &Args) -> Result<Board, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content.lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines, args.goal_piece, (args.goal_row, args.goal_col))
        .map_err(|e| format!("Invalid board format: {}", e))
}

/// Names the direction of a single-cell step between two anchors.
fn direction_name(from: (usize, usize), to: (usize, usize)) -> &'static str {
    if to.0 < from.0 {
        "up"
    } else if to.0 > from.0 {
        "down"
    } else if to.1 < from.1 {
        "left"
    } else {
        "right"
    }
}

/// Describes the single move separating two consecutive path states.
///
/// Fingerprints carry shapes and positions but not ids, so the decoded
/// boards are compared as sets of `(shape, position)` pairs: the pair that
/// disappeared is the moved piece, the pair that appeared is where it went.
fn describe_move(before: &Board, after: &Board) -> String {
    let footprint = |board: &Board| -> HashSet<(Shape, (usize, usize))> {
        board
            .pieces()
            .values()
            .map(|p| (p.shape(), p.position()))
            .collect()
    };
    let old = footprint(before);
    let new = footprint(after);
    match (old.difference(&new).next(), new.difference(&old).next()) {
        (Some(&(shape, from)), Some(&(_, to))) => format!(
            "slide the {} at ({}, {}) {}",
            shape,
            from.0,
            from.1,
            direction_name(from, to)
        ),
        _ => "no visible change".to_string(),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match &args.board_file {
        Some(path) => read_board_file(path, &args)
            .expect(&format!("Failed to read board from file: {}", path.display())),
        None => Board::classic(),
    };
    match &args.board_file {
        Some(path) => println!("Loaded board from {}\n", path.display()),
        None => println!("Using the classic layout.\n"),
    }

    let board = if args.scramble > 0 {
        println!(
            "Scrambling with {} random moves (seed {}).\n",
            args.scramble, args.seed
        );
        board.scrambled(args.scramble, args.seed)
    } else {
        board
    };

    println!("Initial board state:\n{}\n", board);
    println!("Searching...\n");

    let report = solve(&board);
    println!(
        "Search finalized {} states in {:.2?}.\n",
        report.states_finalized, report.elapsed
    );

    if let Some(path) = report.path {
        println!("Solution found:\n");
        println!("Moves ({}):", path.len() - 1);
        if path.len() < 2 {
            println!("  Already solved, no moves needed.");
        } else {
            let codec = StateCodec::for_board(&board);
            let mut previous = board.clone();
            for (i, &fingerprint) in path.iter().enumerate().skip(1) {
                let next = codec
                    .decode(fingerprint)
                    .expect("solver paths only contain decodable fingerprints");
                println!("  Move {}: {}", i, describe_move(&previous, &next));
                previous = next;
            }
            println!("\nFinal board state:\n{}\n", previous);
        }
    } else {
        println!("No solution found.\n");
    }
}
