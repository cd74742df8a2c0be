use crate::engine::{Board, Piece, PieceId, Shape};
use std::collections::BTreeMap;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice in the input array represents a row on the board,
/// starting from row 0. Every cell is one character: `'.'` marks an empty
/// cell, and any other character is a piece label. All cells carrying the
/// same label belong to the same piece, so the label's cells must form a
/// solid rectangle matching one of the supported shapes. Pieces are numbered
/// in order of first appearance when scanning row by row, left to right.
///
/// The goal piece is the piece labelled `goal_label`, or the first 2x2 piece
/// found when `goal_label` is `None`. `goal_position` is where the goal
/// piece's top-left corner has to arrive for the board to count as solved.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the
///   board. All rows must have the same character count.
/// * `goal_label`: The label of the goal piece, or `None` to use the first
///   2x2 piece in scan order.
/// * `goal_position`: Target `(row, column)` for the goal piece's top-left
///   corner.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(String)` if:
///     - `s` is empty, or its rows have no characters or unequal lengths.
///     - The board contains no pieces at all.
///     - Some label's cells do not form a solid rectangle.
///     - A rectangle does not match any supported shape (for example 1x3).
///     - `goal_label` names a label that never appears, or no label is given
///       and the board has no 2x2 piece.
///     - The assembled board is invalid (overlapping pieces, or a goal
///       footprint leaving the grid).
///
/// # Examples
/// ```
/// use klotski_solver::utils::board_from_str_array;
/// use klotski_solver::engine::Shape;
///
/// let board_str = [
///     "abbc", // Row 0
///     "abbc", // Row 1
///     "d..e", // Row 2
/// ];
/// let board = board_from_str_array(&board_str, None, (1, 1)).unwrap();
/// assert_eq!(board.rows(), 3);
/// assert_eq!(board.cols(), 4);
/// let goal = board.pieces()[&board.goal_piece()];
/// assert_eq!(goal.shape(), Shape::Square);
/// assert_eq!(goal.position(), (0, 1));
///
/// let ragged = ["ax", "a"];
/// assert!(board_from_str_array(&ragged, None, (0, 0)).is_err());
/// ```
pub fn board_from_str_array(
    s: &[&str],
    goal_label: Option<char>,
    goal_position: (usize, usize),
) -> Result<Board, String> {
    if s.is_empty() {
        return Err("Board has no rows".to_string());
    }
    let cols = s[0].chars().count();
    if cols == 0 {
        return Err("Rows must contain at least one character".to_string());
    }

    // Group cells by label, keeping labels in order of first appearance so
    // that piece ids are stable for a given picture.
    let mut labels: Vec<(char, Vec<(usize, usize)>)> = Vec::new();
    for (r, row_str) in s.iter().enumerate() {
        if row_str.chars().count() != cols {
            return Err(format!(
                "Row {} has {} characters, expected {}",
                r,
                row_str.chars().count(),
                cols
            ));
        }
        for (c, label) in row_str.chars().enumerate() {
            if label == '.' {
                continue;
            }
            match labels.iter_mut().find(|(l, _)| *l == label) {
                Some((_, cells)) => cells.push((r, c)),
                None => labels.push((label, vec![(r, c)])),
            }
        }
    }
    if labels.is_empty() {
        return Err("Board has no pieces".to_string());
    }

    let mut pieces: BTreeMap<PieceId, Piece> = BTreeMap::new();
    for (id, (label, cells)) in labels.iter().enumerate() {
        // Cells were collected in scan order: the first one carries the top
        // row and the last one the bottom row. Columns need a full pass.
        let (top, _) = cells[0];
        let bottom = cells[cells.len() - 1].0;
        let left = cells.iter().map(|&(_, c)| c).min().unwrap();
        let right = cells.iter().map(|&(_, c)| c).max().unwrap();
        if (bottom - top + 1) * (right - left + 1) != cells.len() {
            return Err(format!("Piece '{}' does not form a solid rectangle", label));
        }
        let shape =
            Shape::from_dims(bottom - top + 1, right - left + 1).map_err(|e| e.to_string())?;
        pieces.insert(id, Piece::new(shape, top, left));
    }

    let goal_piece = match goal_label {
        Some(label) => labels
            .iter()
            .position(|(l, _)| *l == label)
            .ok_or_else(|| format!("Goal label '{}' does not appear on the board", label))?,
        None => pieces
            .iter()
            .find(|(_, piece)| piece.shape() == Shape::Square)
            .map(|(&id, _)| id)
            .ok_or_else(|| "No 2x2 piece to use as the goal piece".to_string())?,
    };

    Board::new(s.len(), cols, pieces, goal_piece, goal_position).map_err(|e| e.to_string())
}
