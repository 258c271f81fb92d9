use std::{io, num::ParseIntError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
    #[error("expected {expected} cells for the grid, found {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("invalid cell symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
    #[error("save data is missing the {0} line")]
    MissingDimension(&'static str),
    #[error("invalid {name} {value:?}: {source}")]
    ParseDimension {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
