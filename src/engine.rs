//! Core board engine for the Klotski sliding-block puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Shape`: The four rectangular piece shapes the puzzle supports.
//! - `Piece`: A shape anchored at a top-left position on the grid.
//! - `Direction`: The four orthogonal single-cell moves.
//! - `Board`: The occupancy grid, with construction validation, legal-move
//!   generation, move application, successor generation, and terminal rendering.
//! - `PuzzleError`: Every failure the engine and the state codec can report.
// TODO: successors clones the full board per move; switch to an apply/undo scratch board if expansion shows up in profiles.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Identifier of a piece, unique within one board.
///
/// Pieces live in a `BTreeMap` keyed by `PieceId`, so every iteration over a
/// board's pieces runs in ascending-id order. All move enumeration relies on
/// that ordering for reproducibility.
pub type PieceId = usize;

/// The four piece shapes the puzzle supports.
///
/// A piece's shape never changes; only its position does. Dimensions are
/// `height` x `width` in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 1x1 pawn.
    Single,
    /// 2x1 piece, two cells stacked vertically.
    VerticalDomino,
    /// 1x2 piece, two cells side by side.
    HorizontalDomino,
    /// 2x2 piece. In the classic layout this is the piece that must escape.
    Square,
}

impl Shape {
    /// Maps raw dimensions to the shape they describe.
    ///
    /// # Arguments
    /// * `rows`: Height of the piece in cells.
    /// * `cols`: Width of the piece in cells.
    ///
    /// # Returns
    /// The matching `Shape`, or `PuzzleError::InvalidShape` if no supported
    /// shape has these dimensions (this covers zero-sized pieces too).
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::engine::Shape;
    /// assert_eq!(Shape::from_dims(2, 2), Ok(Shape::Square));
    /// assert_eq!(Shape::from_dims(2, 1), Ok(Shape::VerticalDomino));
    /// assert!(Shape::from_dims(3, 1).is_err());
    /// assert!(Shape::from_dims(0, 1).is_err());
    /// ```
    pub fn from_dims(rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        match (rows, cols) {
            (1, 1) => Ok(Shape::Single),
            (2, 1) => Ok(Shape::VerticalDomino),
            (1, 2) => Ok(Shape::HorizontalDomino),
            (2, 2) => Ok(Shape::Square),
            _ => Err(PuzzleError::InvalidShape { rows, cols }),
        }
    }

    /// Height of the shape in cells.
    pub fn height(&self) -> usize {
        match self {
            Shape::Single | Shape::HorizontalDomino => 1,
            Shape::VerticalDomino | Shape::Square => 2,
        }
    }

    /// Width of the shape in cells.
    pub fn width(&self) -> usize {
        match self {
            Shape::Single | Shape::VerticalDomino => 1,
            Shape::HorizontalDomino | Shape::Square => 2,
        }
    }

    /// Returns the ANSI background color code used when rendering this shape.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Shape::Single => "44",
            Shape::VerticalDomino => "43",
            Shape::HorizontalDomino => "42",
            Shape::Square => "41",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Single => "single",
            Shape::VerticalDomino => "vertical domino",
            Shape::HorizontalDomino => "horizontal domino",
            Shape::Square => "square",
        };
        write!(f, "{}", name)
    }
}

/// One of the four orthogonal single-cell move directions.
///
/// Move enumeration always tries directions in the order of
/// [`Direction::ALL`]: up, down, left, right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order move enumeration tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The `(row, column)` delta a one-cell step in this direction applies.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Errors reported by board construction, move application, and fingerprint
/// decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// Two pieces claim the same cell.
    #[error("pieces {first} and {second} both claim cell ({row}, {col})")]
    PieceConflict {
        first: PieceId,
        second: PieceId,
        row: usize,
        col: usize,
    },
    /// The requested dimensions match none of the four supported shapes.
    #[error("no supported piece shape is {rows} by {cols}")]
    InvalidShape { rows: usize, cols: usize },
    /// A piece footprint (or the goal footprint) leaves the grid.
    #[error("piece {piece} does not fit on the board at ({row}, {col})")]
    OutOfBounds {
        piece: PieceId,
        row: usize,
        col: usize,
    },
    /// No piece with this id exists on the board.
    #[error("no piece with id {0}")]
    UnknownPiece(PieceId),
    /// The requested destination is not a legal move for the piece.
    #[error("piece {piece} cannot move to ({row}, {col})")]
    IllegalMove {
        piece: PieceId,
        row: usize,
        col: usize,
    },
    /// A 3-bit cell tag in a fingerprint matches no shape.
    #[error("unrecognized shape tag {tag:#05b} at cell ({row}, {col})")]
    UndecodableFingerprint { tag: u8, row: usize, col: usize },
}

/// A shape anchored at a top-left cell.
///
/// The footprint covers `[row, row + height)` x `[col, col + width)`. A
/// piece's position changes only through `Board` move application; its shape
/// never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    row: usize,
    col: usize,
}

impl Piece {
    /// Creates a piece of `shape` with its top-left cell at `(row, col)`.
    ///
    /// No bounds are checked here; `Board::new` validates the footprint when
    /// the piece is placed on a board.
    pub fn new(shape: Shape, row: usize, col: usize) -> Self {
        Piece { shape, row, col }
    }

    /// The piece's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The piece's top-left cell as `(row, column)`.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Height of the piece in cells.
    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Width of the piece in cells.
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    /// Iterates over every cell of the footprint in row-major order.
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::engine::{Piece, Shape};
    /// let piece = Piece::new(Shape::Square, 1, 2);
    /// let cells: Vec<_> = piece.cells().collect();
    /// assert_eq!(cells, vec![(1, 2), (1, 3), (2, 2), (2, 3)]);
    /// ```
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (self.row..self.row + self.shape.height()).flat_map(move |r| {
            (self.col..self.col + self.shape.width()).map(move |c| (r, c))
        })
    }
}

/// Number of rows in the classic layout.
pub const CLASSIC_ROWS: usize = 5;
/// Number of columns in the classic layout.
pub const CLASSIC_COLS: usize = 4;
/// Goal cell of the classic layout: the square must bring its top-left cell
/// here, which parks it on the bottom-center exit.
pub const CLASSIC_GOAL: (usize, usize) = (3, 1);

/// The classic 10-piece starting arrangement on the 5x4 grid.
///
/// One 2x2 square (the goal piece, id 0), four vertical dominoes, one
/// horizontal domino, and four single pawns, leaving cells (2, 0) and (2, 3)
/// empty.
pub fn classic_pieces() -> BTreeMap<PieceId, Piece> {
    BTreeMap::from([
        (0, Piece::new(Shape::Square, 0, 1)),
        (1, Piece::new(Shape::VerticalDomino, 0, 0)),
        (2, Piece::new(Shape::VerticalDomino, 0, 3)),
        (3, Piece::new(Shape::HorizontalDomino, 2, 1)),
        (4, Piece::new(Shape::VerticalDomino, 3, 0)),
        (5, Piece::new(Shape::Single, 3, 1)),
        (6, Piece::new(Shape::Single, 3, 2)),
        (7, Piece::new(Shape::Single, 4, 1)),
        (8, Piece::new(Shape::Single, 4, 2)),
        (9, Piece::new(Shape::VerticalDomino, 3, 3)),
    ])
}

/// Single-character label used when rendering piece ids: `0-9` then `a-z`,
/// wrapping for larger ids.
fn piece_label(id: PieceId) -> char {
    const LABELS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    LABELS[id % LABELS.len()] as char
}

/// A sliding-block board: a rectangular grid occupied by non-overlapping
/// rectangular pieces, one of which must reach a goal cell.
///
/// The occupancy grid in `cells` is derived from `pieces` and the two are
/// only ever updated together. Cloning a board yields a fully independent
/// copy; this is how successor states are produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PieceId>>,
    pieces: BTreeMap<PieceId, Piece>,
    goal_piece: PieceId,
    goal_position: (usize, usize),
}

impl Board {
    /// Builds a board from a piece arrangement, validating every invariant.
    ///
    /// # Arguments
    /// * `rows`, `cols`: Grid dimensions.
    /// * `pieces`: The arrangement; map keys become the piece ids.
    /// * `goal_piece`: Id of the piece that has to reach `goal_position`.
    /// * `goal_position`: Target top-left cell for the goal piece.
    ///
    /// # Returns
    /// The validated board, or:
    /// * `PuzzleError::OutOfBounds` if any footprint (or the goal footprint)
    ///   leaves the grid,
    /// * `PuzzleError::PieceConflict` if two pieces claim the same cell,
    /// * `PuzzleError::UnknownPiece` if `goal_piece` is not in `pieces`.
    pub fn new(
        rows: usize,
        cols: usize,
        pieces: BTreeMap<PieceId, Piece>,
        goal_piece: PieceId,
        goal_position: (usize, usize),
    ) -> Result<Self, PuzzleError> {
        let mut cells: Vec<Option<PieceId>> = vec![None; rows * cols];
        for (&id, &piece) in &pieces {
            if piece.row + piece.height() > rows || piece.col + piece.width() > cols {
                return Err(PuzzleError::OutOfBounds {
                    piece: id,
                    row: piece.row,
                    col: piece.col,
                });
            }
            for (r, c) in piece.cells() {
                let slot = &mut cells[r * cols + c];
                if let Some(first) = *slot {
                    return Err(PuzzleError::PieceConflict {
                        first,
                        second: id,
                        row: r,
                        col: c,
                    });
                }
                *slot = Some(id);
            }
        }

        let goal = pieces
            .get(&goal_piece)
            .copied()
            .ok_or(PuzzleError::UnknownPiece(goal_piece))?;
        if goal_position.0 + goal.height() > rows || goal_position.1 + goal.width() > cols {
            return Err(PuzzleError::OutOfBounds {
                piece: goal_piece,
                row: goal_position.0,
                col: goal_position.1,
            });
        }

        Ok(Board {
            rows,
            cols,
            cells,
            pieces,
            goal_piece,
            goal_position,
        })
    }

    /// The classic starting position: `classic_pieces()` on the 5x4 grid with
    /// the square due at `CLASSIC_GOAL`.
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::engine::Board;
    /// let board = Board::classic();
    /// assert_eq!(board.pieces().len(), 10);
    /// assert!(!board.is_solved());
    /// ```
    pub fn classic() -> Self {
        Board::new(
            CLASSIC_ROWS,
            CLASSIC_COLS,
            classic_pieces(),
            0,
            CLASSIC_GOAL,
        )
        .expect("classic layout is a valid board")
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the grid.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The piece arrangement, keyed by id in ascending order.
    pub fn pieces(&self) -> &BTreeMap<PieceId, Piece> {
        &self.pieces
    }

    /// Id of the piece that has to reach the goal position.
    pub fn goal_piece(&self) -> PieceId {
        self.goal_piece
    }

    /// Target top-left cell for the goal piece.
    pub fn goal_position(&self) -> (usize, usize) {
        self.goal_position
    }

    /// Returns the occupant of the cell at `(row, col)`, if any.
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<PieceId> {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) is outside the {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// The row and column ranges a piece currently occupies.
    ///
    /// # Returns
    /// `(row_range, col_range)` of the footprint, or
    /// `PuzzleError::UnknownPiece` if no piece has this id.
    pub fn coordinates_of(&self, piece: PieceId) -> Result<(Range<usize>, Range<usize>), PuzzleError> {
        let p = self
            .pieces
            .get(&piece)
            .ok_or(PuzzleError::UnknownPiece(piece))?;
        Ok((p.row..p.row + p.height(), p.col..p.col + p.width()))
    }

    /// True once the goal piece's top-left cell sits on the goal position.
    pub fn is_solved(&self) -> bool {
        self.pieces[&self.goal_piece].position() == self.goal_position
    }

    /// Destination of a one-cell step, or `None` if the step is illegal.
    ///
    /// A step is legal when the shifted footprint stays on the grid and the
    /// strip of newly entered cells, one row or column on the leading edge,
    /// is entirely empty. The trailing cells the piece vacates never need
    /// checking for single-cell steps.
    fn destination(&self, piece: Piece, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.offset();
        let row = piece.row.checked_add_signed(dr)?;
        let col = piece.col.checked_add_signed(dc)?;
        if row + piece.height() > self.rows || col + piece.width() > self.cols {
            return None;
        }

        let clear = match direction {
            Direction::Up => (col..col + piece.width()).all(|c| self.cell(row, c).is_none()),
            Direction::Down => {
                let edge = row + piece.height() - 1;
                (col..col + piece.width()).all(|c| self.cell(edge, c).is_none())
            }
            Direction::Left => (row..row + piece.height()).all(|r| self.cell(r, col).is_none()),
            Direction::Right => {
                let edge = col + piece.width() - 1;
                (row..row + piece.height()).all(|r| self.cell(r, edge).is_none())
            }
        };
        clear.then_some((row, col))
    }

    /// Enumerates the legal destinations of a piece, lazily.
    ///
    /// At most four destinations are produced, in up, down, left, right
    /// order. Each is the top-left cell the piece would occupy after a
    /// single-cell step.
    ///
    /// # Returns
    /// The destination iterator, or `PuzzleError::UnknownPiece` if no piece
    /// has this id.
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::engine::Board;
    /// let board = Board::classic();
    /// // The horizontal domino sits between the two empty cells and can
    /// // slide either way; nothing else blocks it.
    /// let moves: Vec<_> = board.legal_moves(3).unwrap().collect();
    /// assert_eq!(moves, vec![(2, 0), (2, 2)]);
    /// ```
    pub fn legal_moves(
        &self,
        piece: PieceId,
    ) -> Result<impl Iterator<Item = (usize, usize)> + '_, PuzzleError> {
        let p = self
            .pieces
            .get(&piece)
            .copied()
            .ok_or(PuzzleError::UnknownPiece(piece))?;
        Ok(Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.destination(p, direction)))
    }

    /// Relocates a piece to `destination` without legality checks.
    ///
    /// The caller vouches that `destination` came from `legal_moves`; passing
    /// anything else is a programming error, caught by a debug assertion but
    /// not reported at runtime in release builds.
    ///
    /// # Panics
    /// Panics if no piece has this id.
    pub fn apply_move(&mut self, piece: PieceId, destination: (usize, usize)) {
        debug_assert!(
            self.legal_moves(piece)
                .map(|mut moves| moves.any(|d| d == destination))
                .unwrap_or(false),
            "apply_move: piece {piece} cannot reach {destination:?}"
        );
        let p = self.pieces[&piece];
        for (r, c) in p.cells() {
            self.cells[r * self.cols + c] = None;
        }
        let moved = Piece {
            row: destination.0,
            col: destination.1,
            ..p
        };
        for (r, c) in moved.cells() {
            self.cells[r * self.cols + c] = Some(piece);
        }
        self.pieces.insert(piece, moved);
    }

    /// The checked face of `apply_move` for interactive callers.
    ///
    /// # Returns
    /// `Ok(())` after relocating the piece, or `PuzzleError::IllegalMove`
    /// (respectively `PuzzleError::UnknownPiece`) with the board untouched.
    ///
    /// # Examples
    /// ```
    /// use klotski_solver::engine::{Board, PuzzleError};
    /// let mut board = Board::classic();
    /// assert!(board.try_move(3, (2, 0)).is_ok());
    /// assert_eq!(
    ///     board.try_move(0, (0, 0)),
    ///     Err(PuzzleError::IllegalMove { piece: 0, row: 0, col: 0 })
    /// );
    /// ```
    pub fn try_move(&mut self, piece: PieceId, destination: (usize, usize)) -> Result<(), PuzzleError> {
        let legal = self.legal_moves(piece)?.any(|d| d == destination);
        if !legal {
            return Err(PuzzleError::IllegalMove {
                piece,
                row: destination.0,
                col: destination.1,
            });
        }
        self.apply_move(piece, destination);
        Ok(())
    }

    /// Enumerates every board reachable in exactly one move, lazily.
    ///
    /// Pieces are visited in ascending id order and directions in up, down,
    /// left, right order, so the sequence is fully deterministic. Each item
    /// is an independent copy of this board with one move applied, paired
    /// with the moved piece's id and its new top-left cell.
    pub fn successors(&self) -> impl Iterator<Item = (Board, PieceId, (usize, usize))> + '_ {
        self.pieces.iter().flat_map(move |(&id, &piece)| {
            Direction::ALL.into_iter().filter_map(move |direction| {
                self.destination(piece, direction).map(|destination| {
                    let mut next = self.clone();
                    next.apply_move(id, destination);
                    (next, id, destination)
                })
            })
        })
    }

    /// Returns a copy of this board after `steps` uniformly random legal
    /// moves.
    ///
    /// The walk is driven by a `SmallRng` seeded from `seed`, so the same
    /// seed always produces the same board. Single-cell moves are reversible,
    /// which keeps every scramble inside the original board's reachable set.
    /// Stops early if a position without legal moves is reached.
    pub fn scrambled(&self, steps: usize, seed: u64) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = self.clone();
        for _ in 0..steps {
            let mut moves: Vec<(PieceId, (usize, usize))> = Vec::new();
            for (&id, &piece) in &board.pieces {
                for direction in Direction::ALL {
                    if let Some(destination) = board.destination(piece, direction) {
                        moves.push((id, destination));
                    }
                }
            }
            if moves.is_empty() {
                break;
            }
            let (id, destination) = moves[rng.gen_range(0..moves.len())];
            board.apply_move(id, destination);
        }
        board
    }

    /// Generates a colored string representation of the board with row and
    /// column numbers.
    ///
    /// Each occupied cell shows its piece's label on a background color keyed
    /// to the shape (singles blue, vertical dominoes yellow, horizontal
    /// dominoes green, squares red) using ANSI escape codes. If `highlight`
    /// names a piece, its cells carry a `*` marker.
    ///
    /// # Arguments
    /// * `highlight`: The piece to mark, or `None` for a plain rendering.
    ///
    /// # Returns
    /// A `String` suitable for terminal output.
    pub fn to_string_colored(&self, highlight: Option<PieceId>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.cols {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..self.cols {
                match self.cell(r_idx, c_idx) {
                    Some(id) => {
                        let color_code = self.pieces[&id].shape().to_ansi_color_code();
                        let marker = if highlight == Some(id) { '*' } else { ' ' };
                        output.push_str(&format!(
                            "\x1b[1;{};m{}{}\x1b[m",
                            color_code,
                            piece_label(id),
                            marker
                        ));
                    }
                    None => output.push_str("\x1b[1;40;m  \x1b[m"),
                }
            }
            if r_idx < self.rows - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    /// Formats the board as a plain character grid: one label per occupied
    /// cell, `.` for empty cells, no headers and no colors.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols {
                match self.cell(r, c) {
                    Some(id) => write!(f, "{}", piece_label(id))?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_classic_layout_census() {
        let board = Board::classic();
        assert_eq!(board.rows(), CLASSIC_ROWS);
        assert_eq!(board.cols(), CLASSIC_COLS);
        assert_eq!(board.pieces().len(), 10);
        assert_eq!(board.goal_piece(), 0);
        assert_eq!(board.goal_position(), CLASSIC_GOAL);
        assert!(!board.is_solved());

        let count_of = |shape: Shape| {
            board
                .pieces()
                .values()
                .filter(|p| p.shape() == shape)
                .count()
        };
        assert_eq!(count_of(Shape::Square), 1);
        assert_eq!(count_of(Shape::VerticalDomino), 4);
        assert_eq!(count_of(Shape::HorizontalDomino), 1);
        assert_eq!(count_of(Shape::Single), 4);

        // The two free cells sit on row 2, next to the horizontal domino.
        assert_eq!(board.cell(2, 0), None);
        assert_eq!(board.cell(2, 3), None);
        let occupied = (0..board.rows())
            .flat_map(|r| (0..board.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| board.cell(r, c).is_some())
            .count();
        assert_eq!(occupied, 18);
    }

    #[test]
    fn test_shape_from_dims() {
        assert_eq!(Shape::from_dims(1, 1), Ok(Shape::Single));
        assert_eq!(Shape::from_dims(2, 1), Ok(Shape::VerticalDomino));
        assert_eq!(Shape::from_dims(1, 2), Ok(Shape::HorizontalDomino));
        assert_eq!(Shape::from_dims(2, 2), Ok(Shape::Square));
        assert_eq!(
            Shape::from_dims(3, 1),
            Err(PuzzleError::InvalidShape { rows: 3, cols: 1 })
        );
        assert_eq!(
            Shape::from_dims(0, 2),
            Err(PuzzleError::InvalidShape { rows: 0, cols: 2 })
        );
    }

    #[test]
    fn test_classic_legal_moves() {
        let board = Board::classic();

        // The vertical dominoes in the top corners can drop into the free
        // cells below them.
        let moves_1: Vec<_> = board.legal_moves(1).unwrap().collect();
        assert_eq!(moves_1, vec![(1, 0)]);
        let moves_2: Vec<_> = board.legal_moves(2).unwrap().collect();
        assert_eq!(moves_2, vec![(1, 3)]);

        // The horizontal domino can slide toward either free cell.
        let moves_3: Vec<_> = board.legal_moves(3).unwrap().collect();
        assert_eq!(moves_3, vec![(2, 0), (2, 2)]);

        // The square and all four pawns are boxed in.
        for id in [0, 5, 6, 7, 8] {
            assert_eq!(
                board.legal_moves(id).unwrap().count(),
                0,
                "piece {} should be immobile in the classic layout",
                id
            );
        }

        assert_eq!(
            board.legal_moves(42).map(|_| ()).unwrap_err(),
            PuzzleError::UnknownPiece(42)
        );
    }

    #[test]
    fn test_classic_successors_exact_sequence() {
        let board = Board::classic();
        let successors: Vec<(PieceId, (usize, usize))> = board
            .successors()
            .map(|(_, id, destination)| (id, destination))
            .collect();
        assert_eq!(
            successors,
            vec![
                (1, (1, 0)),
                (2, (1, 3)),
                (3, (2, 0)),
                (3, (2, 2)),
                (4, (2, 0)),
                (9, (2, 3)),
            ]
        );
    }

    #[test]
    fn test_successors_leave_original_untouched() {
        let board = Board::classic();
        let reference = board.clone();
        for (successor, id, _) in board.successors() {
            // Every successor revalidates from scratch.
            let rebuilt = Board::new(
                successor.rows(),
                successor.cols(),
                successor.pieces().clone(),
                successor.goal_piece(),
                successor.goal_position(),
            );
            assert!(rebuilt.is_ok(), "successor moving piece {} is invalid", id);
        }
        assert_eq!(board, reference);
    }

    #[test]
    fn test_apply_move_updates_cells_and_piece() {
        let mut board = Board::classic();
        board.apply_move(3, (2, 0));
        assert_eq!(board.cell(2, 0), Some(3));
        assert_eq!(board.cell(2, 1), Some(3));
        assert_eq!(board.cell(2, 2), None);
        assert_eq!(board.cell(2, 3), None);
        assert_eq!(board.pieces()[&3].position(), (2, 0));
        let (rows, cols) = board.coordinates_of(3).unwrap();
        assert_eq!((rows, cols), (2..3, 0..2));
    }

    #[test]
    fn test_try_move_applies_legal_move() {
        let mut board = Board::classic();
        assert_eq!(board.try_move(1, (1, 0)), Ok(()));
        assert_eq!(board.cell(0, 0), None);
        assert_eq!(board.cell(1, 0), Some(1));
        assert_eq!(board.cell(2, 0), Some(1));
    }

    #[test]
    fn test_try_move_rejects_illegal_move() {
        let mut board = Board::classic();
        let reference = board.clone();

        // Blocked by the horizontal domino.
        assert_eq!(
            board.try_move(5, (2, 1)),
            Err(PuzzleError::IllegalMove {
                piece: 5,
                row: 2,
                col: 1
            })
        );
        // Not a single-cell step.
        assert_eq!(
            board.try_move(3, (0, 0)),
            Err(PuzzleError::IllegalMove {
                piece: 3,
                row: 0,
                col: 0
            })
        );
        assert_eq!(
            board.try_move(42, (0, 0)),
            Err(PuzzleError::UnknownPiece(42))
        );
        assert_eq!(board, reference, "failed moves must leave the board unchanged");
    }

    #[test]
    fn test_new_rejects_overlap() {
        let pieces = BTreeMap::from([
            (0, Piece::new(Shape::HorizontalDomino, 0, 0)),
            (1, Piece::new(Shape::Single, 0, 1)),
        ]);
        assert_eq!(
            Board::new(2, 2, pieces, 0, (0, 0)).unwrap_err(),
            PuzzleError::PieceConflict {
                first: 0,
                second: 1,
                row: 0,
                col: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_out_of_bounds_piece() {
        let pieces = BTreeMap::from([(0, Piece::new(Shape::VerticalDomino, 4, 0))]);
        assert_eq!(
            Board::new(5, 4, pieces, 0, (0, 0)).unwrap_err(),
            PuzzleError::OutOfBounds {
                piece: 0,
                row: 4,
                col: 0
            }
        );
    }

    #[test]
    fn test_new_rejects_unknown_goal_piece() {
        let pieces = BTreeMap::from([(0, Piece::new(Shape::Single, 0, 0))]);
        assert_eq!(
            Board::new(2, 2, pieces, 7, (0, 0)).unwrap_err(),
            PuzzleError::UnknownPiece(7)
        );
    }

    #[test]
    fn test_new_rejects_goal_position_out_of_bounds() {
        let pieces = BTreeMap::from([(0, Piece::new(Shape::Square, 0, 0))]);
        assert_eq!(
            Board::new(5, 4, pieces, 0, (4, 3)).unwrap_err(),
            PuzzleError::OutOfBounds {
                piece: 0,
                row: 4,
                col: 3
            }
        );
    }

    #[test]
    fn test_is_solved_from_fixture() {
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
    }

    #[test]
    fn test_scrambled_is_deterministic_and_valid() {
        let board = Board::classic();
        assert_eq!(board.scrambled(0, 99), board);

        let first = board.scrambled(25, 7);
        let second = board.scrambled(25, 7);
        assert_eq!(first, second, "same seed must give the same scramble");

        let rebuilt = Board::new(
            first.rows(),
            first.cols(),
            first.pieces().clone(),
            first.goal_piece(),
            first.goal_position(),
        );
        assert!(rebuilt.is_ok(), "scrambled board must stay valid");
    }

    #[test]
    fn test_display_plain_grid() {
        let board = board_from_str_array(&["a.b", "a.."], Some('a'), (0, 0)).unwrap();
        assert_eq!(format!("{}", board), "0.1\n0..");
    }

    #[test]
    fn test_colored_rendering_has_headers() {
        let board = Board::classic();
        let rendered = board.to_string_colored(None);
        assert!(
            rendered.contains("0 1 2 3 "),
            "missing or incorrect column numbers"
        );
        assert!(rendered.contains("\x1b[1;41;m"), "square color missing");
        assert_eq!(
            rendered.trim().lines().count(),
            CLASSIC_ROWS + 1,
            "incorrect number of lines in colored output"
        );

        let highlighted = board.to_string_colored(Some(0));
        assert!(highlighted.contains('*'), "highlight marker missing");
    }

    #[test]
    fn test_coordinates_of_unknown_piece() {
        let board = Board::classic();
        assert_eq!(
            board.coordinates_of(10).unwrap_err(),
            PuzzleError::UnknownPiece(10)
        );
        let (rows, cols) = board.coordinates_of(0).unwrap();
        assert_eq!((rows, cols), (0..2, 1..3));
    }
}
