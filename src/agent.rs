use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Player};
use crate::solver::choose_move;
use crate::DEFAULT_SEARCH_DEPTH;

/// A computer opponent that picks a column for the side to move
pub trait Agent {
    /// Returns a legal column for `player` to play on a board that is not terminal
    fn generate_move(&mut self, board: &Board, player: Player) -> usize;

    fn name(&self) -> &str;
}

/// Plays a uniformly random legal column
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible agent for tests and benchmarks
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn generate_move(&mut self, board: &Board, _player: Player) -> usize {
        let columns = board.legal_columns();
        *columns
            .choose(&mut self.rng)
            .unwrap_or_else(|| panic!("no legal columns on a full board"))
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Plays the column chosen by a fixed-depth minimax search
#[derive(Copy, Clone, Debug)]
pub struct MinimaxAgent {
    pub depth: usize,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn generate_move(&mut self, board: &Board, player: Player) -> usize {
        choose_move(board, player, self.depth)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
