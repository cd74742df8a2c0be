use klotski_solver::engine::{
    Board, Piece, PieceId, Shape, CLASSIC_COLS, CLASSIC_GOAL, CLASSIC_ROWS,
};
use klotski_solver::heuristics::remaining_estimate;
use klotski_solver::solver::solve;
use std::collections::BTreeMap;
use std::time::Duration;

const SCRAMBLE_DEPTHS: [usize; 5] = [4, 8, 12, 16, 20];
const NUM_SCRAMBLES_PER_DEPTH: usize = 10;
const START_SEED: u64 = 0;

/// A solved arrangement with the classic piece census: the square already
/// parked on the goal cell. Scrambling it with reversible single-cell moves
/// yields boards that are solvable by construction.
fn solved_base() -> Board {
    let pieces: BTreeMap<PieceId, Piece> = BTreeMap::from([
        (0, Piece::new(Shape::Square, 3, 1)),
        (1, Piece::new(Shape::VerticalDomino, 0, 0)),
        (2, Piece::new(Shape::VerticalDomino, 0, 3)),
        (3, Piece::new(Shape::HorizontalDomino, 0, 1)),
        (4, Piece::new(Shape::VerticalDomino, 3, 0)),
        (5, Piece::new(Shape::Single, 1, 1)),
        (6, Piece::new(Shape::Single, 1, 2)),
        (7, Piece::new(Shape::Single, 2, 1)),
        (8, Piece::new(Shape::Single, 2, 2)),
        (9, Piece::new(Shape::VerticalDomino, 3, 3)),
    ]);
    Board::new(CLASSIC_ROWS, CLASSIC_COLS, pieces, 0, CLASSIC_GOAL)
        .expect("solved base layout is a valid board")
}

fn main() {
    env_logger::init();

    let base = solved_base();
    println!(
        "Evaluating the search heuristic on {} scrambles per depth...",
        NUM_SCRAMBLES_PER_DEPTH
    );
    println!();
    println!(
        "{:<8}{:<10}{:<14}{:<12}{:<12}{:<14}{}",
        "Depth", "Solved", "Avg estimate", "Avg moves", "Max moves", "Avg states", "Total time"
    );

    for &depth in &SCRAMBLE_DEPTHS {
        let mut solved = 0usize;
        let mut total_estimate = 0u64;
        let mut total_moves = 0u64;
        let mut max_moves = 0u64;
        let mut total_states = 0u64;
        let mut total_time = Duration::ZERO;

        for run in 0..NUM_SCRAMBLES_PER_DEPTH {
            let seed = START_SEED + run as u64;
            let scrambled = base.scrambled(depth, seed);
            total_estimate += u64::from(remaining_estimate(&scrambled));

            let report = solve(&scrambled);
            total_states += report.states_finalized as u64;
            total_time += report.elapsed;
            match report.path {
                Some(path) => {
                    solved += 1;
                    let moves = (path.len() - 1) as u64;
                    total_moves += moves;
                    max_moves = max_moves.max(moves);
                }
                None => eprintln!(
                    "Warning: no solution for depth {} seed {}; scrambles of a solved board should always be solvable.",
                    depth, seed
                ),
            }
        }

        let runs = NUM_SCRAMBLES_PER_DEPTH as f64;
        println!(
            "{:<8}{:<10}{:<14.2}{:<12.2}{:<12}{:<14.2}{:.2?}",
            depth,
            format!("{}/{}", solved, NUM_SCRAMBLES_PER_DEPTH),
            total_estimate as f64 / runs,
            total_moves as f64 / solved.max(1) as f64,
            max_moves,
            total_states as f64 / runs,
            total_time
        );
    }

    println!();
    println!("--- Evaluation Complete ---");
}
