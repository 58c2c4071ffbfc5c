//! Heuristic scoring of Connect 4 positions
//!
//! A position is scored for one player by summing a score over every line of
//! `WINDOW` cells on the board, plus a bonus for each of that player's tiles in
//! the middle column. Higher is better for the player being scored.

use crate::board::{Board, Cell, Player};
use crate::{CENTER_COLUMN, HEIGHT, WINDOW};

/// Bonus per tile in the middle column
pub const CENTER_WEIGHT: i32 = 3;
/// A completed line
pub const FOUR_SCORE: i32 = 100;
/// Three tiles and one empty cell
pub const THREE_SCORE: i32 = 5;
/// Two tiles and two empty cells
pub const TWO_SCORE: i32 = 2;
/// Three opponent tiles and one empty cell
pub const OPPONENT_THREE_PENALTY: i32 = 4;

/// Scores a single line of cells for `player`
///
/// Windows holding tiles of both players in any other ratio score 0.
pub fn score_window(window: &[Cell; WINDOW], player: Player) -> i32 {
    let own = Cell::from(player);
    let theirs = Cell::from(player.opponent());

    let count = |target: Cell| window.iter().filter(|&&cell| cell == target).count();
    let (mine, opponent, empty) = (count(own), count(theirs), count(Cell::Empty));

    let mut score = 0;
    if mine == 4 {
        score += FOUR_SCORE;
    } else if mine == 3 && empty == 1 {
        score += THREE_SCORE;
    } else if mine == 2 && empty == 2 {
        score += TWO_SCORE;
    }

    if opponent == 3 && empty == 1 {
        score -= OPPONENT_THREE_PENALTY;
    }
    score
}

/// Scores the whole board from the point of view of `player`
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let own = Cell::from(player);
    let center_count = (0..HEIGHT)
        .filter(|&row| board.get(row, CENTER_COLUMN) == own)
        .count() as i32;

    let windows: i32 = board
        .windows()
        .map(|window| score_window(&window, player))
        .sum();

    center_count * CENTER_WEIGHT + windows
}
