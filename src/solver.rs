//! A depth-limited minimax agent for Connect 4

use tracing::debug;

use crate::board::{Board, Player};
use crate::evaluation::evaluate;

/// Stand-in for an unbounded lower score
pub const NEG_INFINITY: i32 = i32::MIN;
/// Stand-in for an unbounded upper score
pub const INFINITY: i32 = i32::MAX;

/// Which way a search node pushes the propagated score
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Role {
    Maximize,
    Minimize,
}

impl Role {
    fn next(self) -> Self {
        match self {
            Role::Maximize => Role::Minimize,
            Role::Minimize => Role::Maximize,
        }
    }

    fn worst(self) -> i32 {
        match self {
            Role::Maximize => NEG_INFINITY,
            Role::Minimize => INFINITY,
        }
    }

    fn improves(self, score: i32, value: i32) -> bool {
        match self {
            Role::Maximize => score > value,
            Role::Minimize => score < value,
        }
    }
}

/// An agent to search Connect 4 positions
///
/// # Notes
/// The maximizing side always plays `player` and the minimizing side its
/// opponent. Every leaf, whoever is to move there, is scored from the point
/// of view of `player`.
#[derive(Clone, Debug)]
pub struct Solver {
    player: Player,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` optimising for `player`
    pub fn new(player: Player) -> Self {
        Self {
            player,
            node_count: 0,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Performs game tree search with alpha-beta pruning
    ///
    /// Returns the best column for the side to move (`None` at a leaf) and the
    /// score of the position
    pub fn search(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        role: Role,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        // leaves are checked before the moves are listed, so full boards never reach the loop
        if depth == 0 || board.is_terminal() {
            return (None, evaluate(board, self.player));
        }

        let mover = match role {
            Role::Maximize => self.player,
            Role::Minimize => self.player.opponent(),
        };

        let columns = board.legal_columns();
        let mut value = role.worst();
        let mut best = columns[0];

        for column in columns {
            let mut next = *board;
            next.drop_piece(column, mover);
            let (_, score) = self.search(&next, depth - 1, alpha, beta, role.next());

            // ties keep the earliest column
            if role.improves(score, value) {
                value = score;
                best = column;
            }

            match role {
                Role::Maximize => alpha = alpha.max(value),
                Role::Minimize => beta = beta.min(value),
            }
            if alpha >= beta {
                break;
            }
        }

        (Some(best), value)
    }

    /// Runs a full-window search from the root, returning the best column and its score
    pub fn solve(&mut self, board: &Board, depth: usize) -> (Option<usize>, i32) {
        self.search(board, depth, NEG_INFINITY, INFINITY, Role::Maximize)
    }
}

/// Picks the column `player` should play on `board`, looking `depth` moves ahead
///
/// # Panics
/// Panics if the board is full, as there is no move to make.
pub fn choose_move(board: &Board, player: Player, depth: usize) -> usize {
    let mut solver = Solver::new(player);
    let (best_move, score) = solver.solve(board, depth);

    // a decided game or zero depth yields no move, fall back to the first legal column
    let column = best_move
        .or_else(|| board.legal_columns().first().copied())
        .unwrap_or_else(|| panic!("no legal columns on a full board"));

    debug!(
        ?player,
        column,
        score,
        nodes = solver.node_count,
        depth,
        "chose move"
    );
    column
}
