//! Series of games between computer agents

use anyhow::{anyhow, Result};
use indicatif::*;
use rayon::prelude::*;
use tracing::info;

use std::time::Instant;

use crate::agent::{Agent, MinimaxAgent, RandomAgent};
use crate::board::{Board, GameState, Player};

/// Plays one game from an empty board, `first` moving as player one
///
/// Returns the final state of the board, or an error if an agent picks an
/// unplayable column.
pub fn play_game(first: &mut dyn Agent, second: &mut dyn Agent) -> Result<(GameState, Board)> {
    let mut board = Board::new();
    let mut player = Player::One;

    while !board.is_terminal() {
        let agent: &mut dyn Agent = match player {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let column = agent.generate_move(&board, player);
        if !board.legal_columns().contains(&column) {
            return Err(anyhow!(
                "{} agent chose illegal column {} for {:?}",
                agent.name(),
                column,
                player
            ));
        }
        board.drop_piece(column, player);
        player = player.opponent();
    }
    Ok((board.state(), board))
}

/// Totals of a minimax against random series
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct SeriesResult {
    pub minimax_wins: usize,
    pub random_wins: usize,
    pub draws: usize,
}

impl SeriesResult {
    pub fn games(&self) -> usize {
        self.minimax_wins + self.random_wins + self.draws
    }
}

/// Plays `games` independent games of a depth-`depth` minimax agent against a
/// random agent, alternating who moves first, spread across threads
///
/// Random agents are seeded from `seed` and the game number, so a series is
/// reproducible.
pub fn run_series(games: usize, depth: usize, seed: u64, show_progress: bool) -> Result<SeriesResult> {
    let start = Instant::now();

    let progress = if show_progress {
        ProgressBar::new(games as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes = (0..games)
        .into_par_iter()
        .map(|game| -> Result<(GameState, bool)> {
            let mut minimax = MinimaxAgent::new(depth);
            let mut random = RandomAgent::with_seed(seed.wrapping_add(game as u64));

            // even games the minimax agent opens
            let minimax_first = game % 2 == 0;
            let (state, _) = if minimax_first {
                play_game(&mut minimax, &mut random)?
            } else {
                play_game(&mut random, &mut minimax)?
            };
            progress.inc(1);
            Ok((state, minimax_first))
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();

    let mut result = SeriesResult::default();
    for (state, minimax_first) in outcomes {
        match (state, minimax_first) {
            (GameState::PlayerOneWin, true) | (GameState::PlayerTwoWin, false) => {
                result.minimax_wins += 1
            }
            (GameState::PlayerOneWin, false) | (GameState::PlayerTwoWin, true) => {
                result.random_wins += 1
            }
            (GameState::Draw, _) => result.draws += 1,
            (GameState::Playing, _) => return Err(anyhow!("game ended while still in play")),
        }
    }

    info!(
        games,
        depth,
        minimax_wins = result.minimax_wins,
        random_wins = result.random_wins,
        draws = result.draws,
        "series complete in {}",
        HumanDuration(start.elapsed())
    );
    Ok(result)
}
