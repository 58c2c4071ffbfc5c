//! A heuristic agent for playing the board game 'Connect 4'
//!
//! This agent uses a depth-limited minimax search with alpha-beta pruning
//! over a positional evaluation function. It does not play perfectly, but it
//! is quick enough for casual games at small search depths.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Board, Player}, solver::choose_move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("112233")?;
//! let column = choose_move(&board, Player::One, 4);
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod evaluation;

pub mod solver;

pub mod agent;

pub mod arena;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const WINDOW: usize = 4;

/// The index of the middle column, favoured by the evaluation
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// The search depth used when none is chosen
pub const DEFAULT_SEARCH_DEPTH: usize = 4;

// a winning line must fit on the board in every direction
const_assert!(WIDTH >= WINDOW);
const_assert!(HEIGHT >= WINDOW);
