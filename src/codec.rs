//! Canonical state fingerprints.
//!
//! A board's search identity is a `u64` packing one 3-bit shape tag per cell,
//! scanned row-major with the first cell in the most significant position.
//! Only shapes are encoded, never piece ids, so two boards that differ by a
//! swap of same-shape pieces share one fingerprint. That collapse is what
//! keeps the search space small: interchangeable pieces are interchangeable.
// TODO: widen fingerprints to u128 if a board larger than 21 cells ever ships.
use crate::engine::{Board, Piece, PieceId, PuzzleError, Shape};
use std::collections::BTreeMap;

const EMPTY_TAG: u8 = 0b000;

fn shape_tag(shape: Shape) -> u8 {
    match shape {
        Shape::Single => 0b001,
        Shape::VerticalDomino => 0b010,
        Shape::HorizontalDomino => 0b011,
        Shape::Square => 0b100,
    }
}

fn tag_shape(tag: u8) -> Option<Shape> {
    match tag {
        0b001 => Some(Shape::Single),
        0b010 => Some(Shape::VerticalDomino),
        0b011 => Some(Shape::HorizontalDomino),
        0b100 => Some(Shape::Square),
        _ => None,
    }
}

/// Encoder/decoder between boards of one fixed geometry and their `u64`
/// fingerprints.
///
/// The codec carries the grid dimensions plus the goal piece's shape and
/// target cell, which is everything a fingerprint itself omits. Boards fed to
/// `encode` must share the codec's geometry; boards coming out of `decode`
/// always do.
///
/// # Examples
/// ```
/// use klotski_solver::codec::StateCodec;
/// use klotski_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["aab", "aa."], None, (0, 0)).unwrap();
/// let codec = StateCodec::for_board(&board);
/// let fingerprint = codec.encode(&board);
/// let decoded = codec.decode(fingerprint).unwrap();
/// assert_eq!(codec.encode(&decoded), fingerprint);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StateCodec {
    rows: usize,
    cols: usize,
    goal_shape: Shape,
    goal_position: (usize, usize),
}

impl StateCodec {
    /// Creates a codec for a `rows` x `cols` grid whose goal piece has
    /// `goal_shape` and must reach `goal_position`.
    ///
    /// # Panics
    /// Panics if the grid has no cells or needs more than the 21 cells a
    /// `u64` can hold at 3 bits each.
    pub fn new(
        rows: usize,
        cols: usize,
        goal_shape: Shape,
        goal_position: (usize, usize),
    ) -> Self {
        assert!(rows > 0 && cols > 0, "codec needs a non-empty grid");
        assert!(
            rows * cols * 3 <= 64,
            "{}x{} grid does not fit a 64-bit fingerprint",
            rows,
            cols
        );
        StateCodec {
            rows,
            cols,
            goal_shape,
            goal_position,
        }
    }

    /// Creates the codec matching a board's geometry and goal.
    pub fn for_board(board: &Board) -> Self {
        let goal_shape = board.pieces()[&board.goal_piece()].shape();
        StateCodec::new(
            board.rows(),
            board.cols(),
            goal_shape,
            board.goal_position(),
        )
    }

    /// Packs a board into its canonical fingerprint.
    ///
    /// Cells are scanned row-major; each contributes the 3-bit tag of the
    /// occupying piece's shape, `0b000` for empty. The first cell lands in
    /// the most significant bits.
    pub fn encode(&self, board: &Board) -> u64 {
        debug_assert_eq!(
            (board.rows(), board.cols()),
            (self.rows, self.cols),
            "board geometry does not match the codec"
        );
        let mut fingerprint = 0u64;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let tag = match board.cell(r, c) {
                    Some(id) => shape_tag(board.pieces()[&id].shape()),
                    None => EMPTY_TAG,
                };
                fingerprint = (fingerprint << 3) | u64::from(tag);
            }
        }
        fingerprint
    }

    /// Rebuilds a board from a fingerprint.
    ///
    /// Scanning in the same row-major order, the first unclaimed non-empty
    /// cell anchors a piece of the tagged shape; the whole footprint is then
    /// claimed and skipped. Ids are assigned in discovery order and the first
    /// piece matching the codec's goal shape becomes the goal piece.
    ///
    /// # Returns
    /// The reconstructed board, or an error for any fingerprint that does
    /// not describe a legal board:
    /// * `PuzzleError::UndecodableFingerprint` for an unknown tag,
    /// * `PuzzleError::OutOfBounds` for a footprint leaving the grid,
    /// * `PuzzleError::PieceConflict` for footprints that collide,
    /// * `PuzzleError::UnknownPiece` when no piece has the goal shape.
    ///
    /// No partial board is ever produced.
    pub fn decode(&self, fingerprint: u64) -> Result<Board, PuzzleError> {
        let cell_count = self.rows * self.cols;
        let mut claimed: Vec<Option<PieceId>> = vec![None; cell_count];
        let mut pieces: BTreeMap<PieceId, Piece> = BTreeMap::new();

        for r in 0..self.rows {
            for c in 0..self.cols {
                let index = r * self.cols + c;
                let shift = 3 * (cell_count - 1 - index);
                let tag = ((fingerprint >> shift) & 0b111) as u8;

                if claimed[index].is_some() || tag == EMPTY_TAG {
                    continue;
                }
                let shape = tag_shape(tag).ok_or(PuzzleError::UndecodableFingerprint {
                    tag,
                    row: r,
                    col: c,
                })?;

                let id = pieces.len();
                let piece = Piece::new(shape, r, c);
                for (pr, pc) in piece.cells() {
                    if pr >= self.rows || pc >= self.cols {
                        return Err(PuzzleError::OutOfBounds {
                            piece: id,
                            row: r,
                            col: c,
                        });
                    }
                    let footprint_index = pr * self.cols + pc;
                    if let Some(first) = claimed[footprint_index] {
                        return Err(PuzzleError::PieceConflict {
                            first,
                            second: id,
                            row: pr,
                            col: pc,
                        });
                    }
                    claimed[footprint_index] = Some(id);
                }
                pieces.insert(id, piece);
            }
        }

        // First goal-shaped piece in discovery order; if there is none, hand
        // the constructor an id that cannot exist so it reports UnknownPiece.
        let goal_piece = pieces
            .iter()
            .find(|(_, piece)| piece.shape() == self.goal_shape)
            .map(|(&id, _)| id)
            .unwrap_or(pieces.len());

        Board::new(self.rows, self.cols, pieces, goal_piece, self.goal_position)
    }
}
