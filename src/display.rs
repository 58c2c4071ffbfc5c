use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::board::{Board, Cell};
use connect4_minimax::{HEIGHT, WIDTH};

/// Screen position of a cell, with the bottom row at `origin`
///
/// Rows above the top of the terminal are clamped to its first line.
fn cell_position((origin_x, origin_y): (u16, u16), row: usize, column: usize) -> (u16, u16) {
    (origin_x + column as u16, origin_y.saturating_sub(row as u16))
}

/// Draws the board in colour below the cursor, column labels on top
pub fn draw(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (0..WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor now sits on the bottom row of the board
    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = cell_position((origin_x, origin_y), row, column);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.get(row, column) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
