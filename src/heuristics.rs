//! Guide values for ordering the search frontier.
//!
//! The estimate combines how far the goal piece still has to travel with how
//! crowded its destination is. It is fast and usually effective, but it is
//! not a proven lower bound on the remaining move count, so searches guided
//! by it trade optimality for speed.
use crate::engine::Board;
use std::collections::HashSet;

/// Manhattan distance from the goal piece's top-left cell to the goal
/// position.
///
/// # Arguments
/// * `board`: The board to measure.
///
/// # Returns
/// The row distance plus the column distance, in cells.
pub fn goal_distance(board: &Board) -> u32 {
    let piece = board.pieces()[&board.goal_piece()];
    let (row, col) = piece.position();
    let (goal_row, goal_col) = board.goal_position();
    (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
}

/// Number of distinct pieces, other than the goal piece itself, currently
/// overlapping the goal footprint.
///
/// Each such piece needs at least one move before the goal piece can settle,
/// though clearing one can block another, which is why the combined estimate
/// stays a heuristic rather than a bound.
pub fn blocking_pieces(board: &Board) -> u32 {
    let goal = board.pieces()[&board.goal_piece()];
    let (goal_row, goal_col) = board.goal_position();

    let mut blockers = HashSet::new();
    for r in goal_row..goal_row + goal.height() {
        for c in goal_col..goal_col + goal.width() {
            if let Some(id) = board.cell(r, c) {
                if id != board.goal_piece() {
                    blockers.insert(id);
                }
            }
        }
    }
    blockers.len() as u32
}

/// The frontier ordering estimate: `goal_distance` plus `blocking_pieces`.
///
/// Zero exactly on solved boards; the goal piece never counts itself as a
/// blocker even while partially overlapping its destination.
pub fn remaining_estimate(board: &Board) -> u32 {
    goal_distance(board) + blocking_pieces(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_classic_estimate() {
        let board = Board::classic();
        // Three rows of travel, four pawns camped on the exit.
        assert_eq!(goal_distance(&board), 3);
        assert_eq!(blocking_pieces(&board), 4);
        assert_eq!(remaining_estimate(&board), 7);
    }

    #[test]
    fn test_solved_board_estimates_zero() {
        let board = board_from_str_array(
            &[
                "b...",
                "b...",
                "....",
                ".aa.",
                ".aa.",
            ],
            None,
            (3, 1),
        )
        .unwrap();
        assert!(board.is_solved());
        assert_eq!(remaining_estimate(&board), 0);
    }

    #[test]
    fn test_goal_piece_does_not_block_itself() {
        // The square overlaps the top half of its destination; only the pawn
        // below it counts as a blocker.
        let board = board_from_str_array(
            &[
                "....",
                "....",
                ".aa.",
                ".aa.",
                ".b..",
            ],
            None,
            (3, 1),
        )
        .unwrap();
        assert_eq!(goal_distance(&board), 1);
        assert_eq!(blocking_pieces(&board), 1);
        assert_eq!(remaining_estimate(&board), 2);
    }

    #[test]
    fn test_blockers_counted_once_per_piece() {
        // The horizontal domino covers two goal cells but is one blocker.
        let board = board_from_str_array(
            &[
                ".aa.",
                ".aa.",
                "....",
                ".cc.",
                "....",
            ],
            None,
            (3, 1),
        )
        .unwrap();
        assert_eq!(blocking_pieces(&board), 1);
        assert_eq!(remaining_estimate(&board), 3 + 1);
    }
}
