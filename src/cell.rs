//! The two-valued cell state and its on-disc alphabet.

use std::fmt;

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    /// Symbol written to save files and printed by the text renderer for a live cell.
    pub const ALIVE_SYMBOL: char = '*';
    /// Symbol for a dead cell.
    pub const DEAD_SYMBOL: char = ' ';

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Alive => Self::ALIVE_SYMBOL,
            Cell::Dead => Self::DEAD_SYMBOL,
        }
    }

    /// Parses a save-file symbol, returning `None` for anything outside the alphabet.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            Self::ALIVE_SYMBOL => Some(Cell::Alive),
            Self::DEAD_SYMBOL => Some(Cell::Dead),
            _ => None,
        }
    }

    /// Applies the classic rule: survive on 2 or 3, birth on exactly 3.
    pub fn next(self, live_neighbors: u8) -> Cell {
        match (self, live_neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_cell_survives_only_on_two_or_three() {
        for n in 0..=8u8 {
            let expected = if n == 2 || n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(Cell::Alive.next(n), expected, "live cell with {n} neighbors");
        }
    }

    #[test]
    fn dead_cell_is_born_only_on_three() {
        for n in 0..=8u8 {
            let expected = if n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(Cell::Dead.next(n), expected, "dead cell with {n} neighbors");
        }
    }

    #[test]
    fn symbols_parse_back() {
        assert_eq!(Cell::from_symbol('*'), Some(Cell::Alive));
        assert_eq!(Cell::from_symbol(' '), Some(Cell::Dead));
        assert_eq!(Cell::from_symbol('x'), None);
    }
}
