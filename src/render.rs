//! Plain-text frames for the console.

use std::io::{self, Write};

use crate::{cell::Cell, life::Life};

/// Cells as text: one row per line, symbols separated by spaces.
pub fn grid_text(cells: &[Cell], width: usize) -> String {
    let mut grid = String::with_capacity(cells.len() * 2);
    for row in cells.chunks(width) {
        for (col, cell) in row.iter().enumerate() {
            if col > 0 {
                grid.push(' ');
            }
            grid.push(cell.symbol());
        }
        grid.push('\n');
    }
    grid
}

/// Writes the current frame followed by its generation number.
pub fn write_frame<W: Write>(out: &mut W, life: &Life) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{}", grid_text(life.current_cells(), life.width()))?;
    writeln!(out)?;
    writeln!(out, "Generation: {}", life.generation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_space_separated() {
        let cells = vec![Cell::Alive, Cell::Dead, Cell::Alive, Cell::Dead, Cell::Alive, Cell::Dead];
        assert_eq!(grid_text(&cells, 3), "*   *\n  *  \n");
    }

    #[test]
    fn frame_ends_with_generation() {
        let mut life = Life::new(2, 2);
        life.advance();
        let mut out = Vec::new();
        write_frame(&mut out, &life).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\n   \n   \n\nGeneration: 2\n");
    }
}
