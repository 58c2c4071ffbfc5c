use anyhow::{anyhow, Result};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

use crate::{HEIGHT, WIDTH, WINDOW};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn symbol(&self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => ' ',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// Reasons an externally supplied column cannot be played
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Input is not a number.")]
    WrongType,
    #[error("Input is not an integer, or isn't equal to an integer in value.")]
    NotInteger,
    #[error("Input is out of bounds.")]
    OutOfBounds,
    #[error("Selected column is full.")]
    FullColumn,
}

/// Classifies a column typed in by a person, returning the column when it can be played
pub fn check_move_status(board: &Board, input: &str) -> Result<usize, MoveError> {
    let numeric: f64 = input.trim().parse().map_err(|_| MoveError::WrongType)?;
    // infinities and NaN have a NaN fractional part
    if numeric.fract() != 0.0 {
        return Err(MoveError::NotInteger);
    }
    if numeric < 0.0 || numeric >= WIDTH as f64 {
        return Err(MoveError::OutOfBounds);
    }
    let column = numeric as usize;
    if !board.playable(column) {
        return Err(MoveError::FullColumn);
    }
    Ok(column)
}

/// Offsets of the four line orientations as (row step, column step)
const DIRECTIONS: [(isize, isize); 4] = [
    // horizontal
    (0, 1),
    // vertical
    (1, 0),
    // diagonal /
    (1, 1),
    // diagonal \
    (-1, 1),
];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
        }
    }

    /// Builds a position from a string of 1-indexed column digits, players alternating from player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let column = column - 1;
                    if !board.playable(column) {
                        return Err(anyhow!("Invalid move, column {} full", column + 1));
                    }
                    board.drop_piece(column, player);
                    player = player.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// The cell at `row` (0 is the bottom) and `column`
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    fn set(&mut self, row: usize, column: usize, cell: Cell) {
        self.cells[column + WIDTH * row] = cell;
    }

    /// True iff the top cell of `column` is empty
    pub fn playable(&self, column: usize) -> bool {
        self.get(HEIGHT - 1, column).is_empty()
    }

    /// Drops a tile of `player` to the lowest empty row of `column`, returning that row
    ///
    /// # Panics
    /// Dropping into a full or nonexistent column is a logic error; callers
    /// must check [`Board::playable`] first.
    pub fn drop_piece(&mut self, column: usize, player: Player) -> usize {
        assert!(column < WIDTH, "column {} is off the board", column);
        let row = (0..HEIGHT)
            .find(|&row| self.get(row, column).is_empty())
            .unwrap_or_else(|| panic!("cannot drop into full column {}", column));
        self.set(row, column, player.into());
        row
    }

    /// All playable columns in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.playable(column))
    }

    pub fn num_moves(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Every run of `WINDOW` consecutive cells in each of the four orientations
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW]> + '_ {
        DIRECTIONS.iter().flat_map(move |&(dy, dx)| {
            (0..HEIGHT).flat_map(move |row| {
                (0..WIDTH).filter_map(move |column| self.window(row, column, dy, dx))
            })
        })
    }

    fn window(&self, row: usize, column: usize, dy: isize, dx: isize) -> Option<[Cell; WINDOW]> {
        let span = WINDOW as isize - 1;
        let (end_y, end_x) = (row as isize + dy * span, column as isize + dx * span);
        if end_y < 0 || end_y >= HEIGHT as isize || end_x < 0 || end_x >= WIDTH as isize {
            return None;
        }

        let mut window = [Cell::Empty; WINDOW];
        for (i, cell) in window.iter_mut().enumerate() {
            let i = i as isize;
            *cell = self.get((row as isize + dy * i) as usize, (column as isize + dx * i) as usize);
        }
        Some(window)
    }

    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        let cell = Cell::from(player);
        self.windows()
            .any(|window| window.iter().all(|&other| other == cell))
    }

    /// True iff either player has won or the board is full
    pub fn is_terminal(&self) -> bool {
        self.has_four_in_a_row(Player::One) || self.has_four_in_a_row(Player::Two) || self.is_full()
    }

    pub fn state(&self) -> GameState {
        if self.has_four_in_a_row(Player::One) {
            GameState::PlayerOneWin
        } else if self.has_four_in_a_row(Player::Two) {
            GameState::PlayerTwoWin
        } else if self.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn separator() -> String {
    format!("|{}|", "=".repeat(2 * WIDTH))
}

fn column_labels() -> String {
    let labels: String = (0..WIDTH).map(|column| format!("{} ", column)).collect();
    format!("|{}|", labels)
}

/// Renders the board top row first with the bottom-left cell in the lower left:
///
/// ```text
/// |==============|
/// |              |
/// |              |
/// |    X X       |
/// |    O X X     |
/// |  O X O O     |
/// |  O O X X     |
/// |==============|
/// |0 1 2 3 4 5 6 |
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", separator())?;
        for row in (0..HEIGHT).rev() {
            write!(f, "|")?;
            for column in 0..WIDTH {
                write!(f, "{} ", self.get(row, column).symbol())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", separator())?;
        writeln!(f, "{}", column_labels())
    }
}

/// Parses the output of the `Display` implementation back into a board
impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != HEIGHT + 3 {
            return Err(anyhow!(
                "expected {} lines in board text, found {}",
                HEIGHT + 3,
                lines.len()
            ));
        }
        if lines[0] != separator() || lines[HEIGHT + 1] != separator() {
            return Err(anyhow!("board text is missing its separator lines"));
        }
        if lines[HEIGHT + 2] != column_labels() {
            return Err(anyhow!("board text is missing its column labels"));
        }

        let mut board = Self::new();
        for (line_idx, line) in lines[1..=HEIGHT].iter().enumerate() {
            let row = HEIGHT - 1 - line_idx;
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != 2 * WIDTH + 2 || chars[0] != '|' || chars[2 * WIDTH + 1] != '|' {
                return Err(anyhow!("malformed board row '{}'", line));
            }
            for column in 0..WIDTH {
                let cell = match chars[1 + 2 * column] {
                    'X' => Cell::PlayerOne,
                    'O' => Cell::PlayerTwo,
                    ' ' => Cell::Empty,
                    other => return Err(anyhow!("unknown tile '{}' in row '{}'", other, line)),
                };
                board.set(row, column, cell);
            }
        }

        // no tile may float above an empty cell
        for column in 0..WIDTH {
            for row in 1..HEIGHT {
                if !board.get(row, column).is_empty() && board.get(row - 1, column).is_empty() {
                    return Err(anyhow!("floating tile in column {}", column));
                }
            }
        }
        Ok(board)
    }
}
