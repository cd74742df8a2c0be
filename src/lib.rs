//! # Klotski Solver Library
//!
//! This library provides the core game logic for the Klotski sliding-block
//! puzzle and a best-first search solver that finds a line of play moving the
//! goal piece to its exit cell.
//!
//! It is used by three binaries:
//! - `human_player`: Allows interactive play via the command line, with undo
//!   and a built-in solver to ask for the way out.
//! - `ai_solver`: Takes a board configuration (or the classic layout), runs
//!   the search, and prints the solution move by move.
//! - `heuristic_evaluator`: Scrambles solved boards to various depths and
//!   reports how much work the search needs to undo them.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`), piece shapes and
//!   positions (`Shape`, `Piece`), move generation, and terminal rendering.
//! - `codec`: Packs board states into `u64` fingerprints and restores boards
//!   from them.
//! - `solver`: Provides the `solve` function, a best-first search over
//!   fingerprinted states.
//! - `heuristics`: Scores how far a board is from solved; the search uses
//!   this to order its frontier.
//! - `utils`: Provides utility functions, such as parsing board
//!   configurations from strings.

pub mod codec;
pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;

// Items from sub-modules like `engine`, `solver`, etc., if public, should be
// accessed via their full path, e.g., `klotski_solver::solver::solve()`.
// This keeps the top-level library namespace cleaner.
