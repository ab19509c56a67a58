use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tictactoe3d::{board::Board, lines::Line, Cell, Coord, SIZE};

/// Prints the board one layer at a time, highlighting the cells of `line`
pub fn display(board: &Board, line: Option<&Line>) -> Result<()> {
    let mut stdout = stdout();

    let header: String = (1..=SIZE).map(|x| format!(" {} ", x)).collect();
    stdout.queue(PrintStyledContent(style(format!("\n    {}\n", header))))?;

    for z in 0..SIZE {
        stdout.queue(PrintStyledContent(
            style(format!("Layer {}\n", z + 1)).attribute(Attribute::Bold),
        ))?;
        for y in 0..SIZE {
            stdout.queue(PrintStyledContent(style(format!("  {} ", y + 1))))?;
            for x in 0..SIZE {
                let coord = Coord::new(x, y, z);
                let cell = board.cell_at(coord)?;
                let winning = line.map_or(false, |line| line.contains(coord));

                let text = if winning {
                    format!("[{}]", cell.symbol())
                } else {
                    format!(" {} ", cell.symbol())
                };
                let mut styled = style(text).with(match cell {
                    Cell::X => Color::Red,
                    Cell::O => Color::Yellow,
                    Cell::Empty => Color::DarkGrey,
                });
                if winning {
                    styled = styled.attribute(Attribute::Bold).on(Color::DarkBlue);
                }
                stdout.queue(PrintStyledContent(styled))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
