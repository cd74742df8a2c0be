use klotski_solver::codec::StateCodec;
use klotski_solver::engine::{Board, Direction, PieceId};
use klotski_solver::solver::solve;
use std::io::{self, Write}; // For input/output

/// Destination cell of a one-cell step, or `None` when it would leave the grid.
fn step_target(board: &Board, piece: PieceId, direction: Direction) -> Option<(usize, usize)> {
    let (row, col) = board.pieces().get(&piece)?.position();
    let (dr, dc) = direction.offset();
    Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?))
}

/// The direction of a one-cell step between two top-left positions.
fn direction_towards(from: (usize, usize), to: (usize, usize)) -> Direction {
    if to.0 < from.0 {
        Direction::Up
    } else if to.0 > from.0 {
        Direction::Down
    } else if to.1 < from.1 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// The input key bound to a direction.
fn key_for(direction: Direction) -> char {
    match direction {
        Direction::Up => 'w',
        Direction::Down => 's',
        Direction::Left => 'a',
        Direction::Right => 'd',
    }
}

/// Runs the search from the current position and prints the first move of
/// the line it found.
fn print_hint(board: &Board) {
    println!("Thinking...");
    let report = solve(board);
    match report.path {
        Some(path) if path.len() >= 2 => {
            let codec = StateCodec::for_board(board);
            // Match the second path state back to a move on this board.
            if let Some((_, id, destination)) = board
                .successors()
                .find(|(successor, _, _)| codec.encode(successor) == path[1])
            {
                let from = board.pieces()[&id].position();
                let direction = direction_towards(from, destination);
                println!(
                    "Hint: {} move(s) to go. Move piece {} {} (enter '{} {}').",
                    path.len() - 1,
                    id,
                    direction,
                    id,
                    key_for(direction)
                );
            }
        }
        Some(_) => println!("The board is already solved."),
        None => println!("No solution exists from this position."),
    }
}

fn main() {
    env_logger::init();
    let mut board = Board::classic();
    let mut history: Vec<Board> = Vec::new();
    println!("Welcome to Klotski!");
    println!("Slide the big red square to the bottom-center exit.");

    loop {
        println!("---------------------");
        println!("Moves made: {}", history.len());
        println!("{}", board.to_string_colored(None));

        if board.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 PUZZLE SOLVED in {} moves! 🎉", history.len());
            println!("---------------------");
            break;
        }

        print!("Enter your move (piece w|a|s|d), 'u' to undo, 'h' for a hint, 'q' to quit: ");
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "u" {
            match history.pop() {
                Some(previous) => {
                    board = previous;
                    println!("Move undone.");
                }
                None => println!("Cannot undo further (already at the starting position)."),
            }
            continue;
        }

        if trimmed_input == "h" {
            print_hint(&board);
            continue;
        }

        // Try to parse as a piece id plus a direction key.
        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 {
            println!("Invalid input format. Use 'piece direction' (e.g. '3 a'), 'u', 'h', or 'q'.");
            continue;
        }
        let piece: PieceId = match parts[0].parse() {
            Ok(id) => id,
            Err(_) => {
                println!(
                    "Invalid piece id '{}'. Use the number shown on the piece.",
                    parts[0]
                );
                continue;
            }
        };
        if !board.pieces().contains_key(&piece) {
            println!("No piece with id {} on the board.", piece);
            continue;
        }
        let direction = match parts[1] {
            "w" => Direction::Up,
            "s" => Direction::Down,
            "a" => Direction::Left,
            "d" => Direction::Right,
            other => {
                println!(
                    "Unknown direction '{}'. Use w (up), s (down), a (left) or d (right).",
                    other
                );
                continue;
            }
        };

        match step_target(&board, piece, direction) {
            Some(destination) => {
                let before = board.clone();
                match board.try_move(piece, destination) {
                    Ok(()) => history.push(before),
                    Err(e) => println!("Invalid move: {}", e),
                }
            }
            None => println!("Invalid move: piece {} cannot go {} from here.", piece, direction),
        }
    }
}
