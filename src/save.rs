//! Save files: height, width and the flattened cells of the current frame.
//!
//! ```text
//! 3
//! 4
//!  *
//!  **
//!
//! ```
//!
//! The first two lines hold the height and width. Everything after them is read
//! as cell symbols with line breaks ignored.

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{cell::Cell, error::LifeError, life::Life};

const FILE_PREFIX: &str = "life_";

/// A grid read from disc, not yet validated against its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGrid {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<Cell>,
}

impl SavedGrid {
    /// Parses the contents of a save file.
    pub fn parse(contents: &str) -> Result<SavedGrid, LifeError> {
        let mut rest = contents;
        let height = take_dimension(&mut rest, "height")?;
        let width = take_dimension(&mut rest, "width")?;

        let cells = rest
            .chars()
            .filter(|&symbol| symbol != '\n' && symbol != '\r')
            .enumerate()
            .map(|(position, symbol)| {
                Cell::from_symbol(symbol).ok_or(LifeError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SavedGrid {
            height,
            width,
            cells,
        })
    }

    /// Hands the grid to `life`, which rejects it if the cell count is wrong.
    pub fn apply_to(self, life: &mut Life) -> Result<(), LifeError> {
        life.load(self.height, self.width, self.cells)
    }
}

fn take_dimension<'a>(rest: &mut &'a str, name: &'static str) -> Result<usize, LifeError> {
    let current: &'a str = *rest;
    let (line, tail) = current.split_once('\n').unwrap_or((current, ""));
    *rest = tail;

    let value = line
        .split_whitespace()
        .next()
        .ok_or(LifeError::MissingDimension(name))?;
    value.parse().map_err(|source| LifeError::ParseDimension {
        name,
        value: value.to_string(),
        source,
    })
}

/// Writes the current frame of `life` to `path`. History is not saved.
pub fn save_file(life: &Life, path: &Path) -> Result<(), LifeError> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    writeln!(out, "{}", life.height())?;
    writeln!(out, "{}", life.width())?;
    for row in life.current_cells().chunks(life.width()) {
        let line: String = row.iter().map(|cell| cell.symbol()).collect();
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    debug!(path = %path.display(), "saved grid");
    Ok(())
}

pub fn load_file(path: &Path) -> Result<SavedGrid, LifeError> {
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), "read save file");
    SavedGrid::parse(&contents)
}

/// Directory holding numbered save files (`life_1`, `life_2`, ...).
#[derive(Debug, Clone)]
pub struct SaveDir {
    root: PathBuf,
}

impl SaveDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SaveDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a save file given by name, relative to the directory.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path one past the highest numbered save in the directory, creating the
    /// directory if needed.
    pub fn next_path(&self) -> Result<PathBuf, LifeError> {
        fs::create_dir_all(&self.root)?;

        let mut highest = 0u64;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let number = name
                .to_str()
                .and_then(|name| name.rsplit('_').next())
                .and_then(|suffix| suffix.parse::<u64>().ok());
            if let Some(number) = number {
                highest = highest.max(number);
            }
        }

        Ok(self.root.join(format!("{FILE_PREFIX}{}", highest + 1)))
    }

    /// Saves `life` under the next free number and returns the path used.
    pub fn save(&self, life: &Life) -> Result<PathBuf, LifeError> {
        let path = self.next_path()?;
        save_file(life, &path)?;
        Ok(path)
    }

    /// Loads the named save into `life`, leaving it untouched on failure.
    pub fn load_into(&self, name: &str, life: &mut Life) -> Result<(), LifeError> {
        load_file(&self.resolve(name))?.apply_to(life)
    }
}
