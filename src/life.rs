//! The Life engine: current frame, navigable history and loop detection.

use std::fmt;

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{cell::Cell, error::LifeError, neighbors::NeighborIndex};

/// Live/dead split of a cell's 8 neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborCounts {
    pub alive: u8,
    pub dead: u8,
}

/// Statistics about the frame under the history cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Current generation number (1-based)
    pub generation: usize,
    /// Number of living cells in the current frame
    pub population: usize,
    /// Cells that became alive since the previous generation
    pub born: usize,
    /// Cells that died since the previous generation
    pub died: usize,
}

/// Result of running the simulation forward for a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Generation number the cursor ended on
    pub generation: usize,
    /// How many times `advance` was called
    pub advanced: usize,
    /// Whether the run stopped because a repeating state was found
    pub looped: bool,
}

/// Shape and cache sizes of an engine, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub height: usize,
    pub width: usize,
    pub cells: usize,
    pub neighbor_entries: usize,
}

impl Summary {
    /// Same fields as `Display`, on a single line.
    pub fn single_line(&self) -> String {
        format!(
            "height: {} width: {} cells: {} neighbor entries: {}",
            self.height, self.width, self.cells, self.neighbor_entries
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "height:           {}", self.height)?;
        writeln!(f, "width:            {}", self.width)?;
        writeln!(f, "cells:            {}", self.cells)?;
        write!(f, "neighbor entries: {}", self.neighbor_entries)
    }
}

/// Conway's Game of Life on a toroidal grid, with every computed generation kept.
///
/// The visible frame is always `history[cursor]`. Frames are owned snapshots;
/// navigation only moves the cursor.
#[derive(Debug, Clone)]
pub struct Life {
    height: usize,
    width: usize,
    neighbors: NeighborIndex,
    history: Vec<Vec<Cell>>,
    cursor: usize,
}

impl Life {
    /// Creates an all-dead grid with a single-frame history.
    ///
    /// # Panics
    ///
    /// Panics if `height` or `width` is zero.
    pub fn new(height: usize, width: usize) -> Life {
        assert!(height > 0 && width > 0, "grid dimensions must be positive");

        Life {
            height,
            width,
            neighbors: NeighborIndex::build(height, width),
            history: vec![vec![Cell::Dead; height * width]],
            cursor: 0,
        }
    }

    /// Creates an engine whose first generation is `cells`, validated like [`Life::load`].
    pub fn with_cells(height: usize, width: usize, cells: Vec<Cell>) -> Result<Life, LifeError> {
        validate(height, width, cells.len())?;
        let mut life = Life::new(height, width);
        life.reset_history(cells);
        Ok(life)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn neighbor_index(&self) -> &NeighborIndex {
        &self.neighbors
    }

    /// The frame under the cursor, in row-major order.
    pub fn current_cells(&self) -> &[Cell] {
        &self.history[self.cursor]
    }

    /// 1-based number of the generation under the cursor.
    pub fn generation(&self) -> usize {
        self.cursor + 1
    }

    /// Number of generations computed so far.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Vec<Cell>] {
        &self.history
    }

    /// Sets each cell alive with probability `percent`%, dead otherwise.
    ///
    /// Discards all history; the new frame becomes generation 1.
    pub fn randomize<R: Rng>(&mut self, percent: u8, rng: &mut R) {
        let cells = (0..self.height * self.width)
            .map(|_| Cell::from(rng.gen_range(1..=100u8) <= percent))
            .collect();
        debug!(percent, height = self.height, width = self.width, "randomized grid");
        self.reset_history(cells);
    }

    /// Computes the next generation from the frame under the cursor.
    ///
    /// If the cursor had been rewound, every frame after it is dropped before the
    /// new frame is appended.
    pub fn advance(&mut self) {
        let current = &self.history[self.cursor];
        let neighbors = &self.neighbors;
        let next: Vec<Cell> = current
            .par_iter()
            .enumerate()
            .map(|(index, &cell)| cell.next(live_neighbors(current, neighbors, index)))
            .collect();

        if self.cursor != self.history.len() - 1 {
            debug!(
                dropped = self.history.len() - 1 - self.cursor,
                "discarding future generations"
            );
            self.history.truncate(self.cursor + 1);
        }
        self.history.push(next);
        self.cursor += 1;
    }

    /// Moves the cursor `amount` generations back. Returns `false` and leaves the
    /// cursor alone if that would pass the first generation.
    pub fn rewind(&mut self, amount: usize) -> bool {
        match self.cursor.checked_sub(amount) {
            Some(cursor) => {
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    /// Moves the cursor `amount` generations forward through already computed
    /// history. Returns `false` if that would pass the newest generation.
    pub fn forward(&mut self, amount: usize) -> bool {
        match self.cursor.checked_add(amount) {
            Some(cursor) if cursor < self.history.len() => {
                self.cursor = cursor;
                true
            }
            _ => false,
        }
    }

    pub fn jump_to_first(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.cursor = self.history.len() - 1;
    }

    /// Moves the cursor to the 1-based generation `n`, if it exists.
    pub fn set_generation(&mut self, n: usize) -> bool {
        if n == 0 || n > self.history.len() {
            return false;
        }
        self.cursor = n - 1;
        true
    }

    /// The frame `n` generations before the cursor, without moving it.
    pub fn past_state(&self, n: usize) -> Option<&[Cell]> {
        let index = self.cursor.checked_sub(n)?;
        Some(&self.history[index])
    }

    /// Whether the newest frame repeats one of the two frames before it.
    ///
    /// Only catches still lifes and period-2 oscillators; longer cycles are never
    /// reported, so long runs need their own generation cap.
    pub fn is_looping(&self) -> bool {
        let len = self.history.len();
        len >= 3 && {
            let last = &self.history[len - 1];
            *last == self.history[len - 2] || *last == self.history[len - 3]
        }
    }

    /// Live/dead neighbor split of `index` in the current frame, or `None` if
    /// `index` is outside the grid.
    pub fn neighbor_counts_at(&self, index: usize) -> Option<NeighborCounts> {
        if index >= self.neighbors.len() {
            return None;
        }
        let alive = live_neighbors(self.current_cells(), &self.neighbors, index);
        Some(NeighborCounts {
            alive,
            dead: 8 - alive,
        })
    }

    /// Replaces the grid with externally supplied data.
    ///
    /// Validation happens before anything is touched, so on error the cells,
    /// history and cursor are exactly as they were. On success history restarts
    /// at generation 1 and the neighbor index is rebuilt if the shape changed.
    pub fn load(&mut self, height: usize, width: usize, cells: Vec<Cell>) -> Result<(), LifeError> {
        if let Err(err) = validate(height, width, cells.len()) {
            warn!(%err, "rejected grid data");
            return Err(err);
        }

        if (height, width) != (self.height, self.width) {
            self.neighbors = NeighborIndex::build(height, width);
            self.height = height;
            self.width = width;
        }
        debug!(height, width, "loaded grid");
        self.reset_history(cells);
        Ok(())
    }

    /// Advances up to `steps` times, stopping early once a loop is detected.
    pub fn run(&mut self, steps: usize) -> RunOutcome {
        let mut advanced = 0;
        let looped = loop {
            if self.cursor == self.history.len() - 1 && self.is_looping() {
                break true;
            }
            if advanced == steps {
                break false;
            }
            self.advance();
            advanced += 1;
        };

        let outcome = RunOutcome {
            generation: self.generation(),
            advanced,
            looped,
        };
        info!(
            generation = outcome.generation,
            advanced, looped, "simulation run finished"
        );
        outcome
    }

    /// Runs until a loop is found or the cursor reaches generation `cap`.
    pub fn run_out(&mut self, cap: usize) -> RunOutcome {
        self.run(cap.saturating_sub(self.generation()))
    }

    /// Population and the births/deaths that led to the current frame.
    pub fn stats(&self) -> Stats {
        let current = self.current_cells();
        let population = current.iter().filter(|cell| cell.is_alive()).count();
        let (born, died) = match self.past_state(1) {
            Some(previous) => previous.iter().zip(current).fold(
                (0, 0),
                |(born, died), (&before, &after)| match (before, after) {
                    (Cell::Dead, Cell::Alive) => (born + 1, died),
                    (Cell::Alive, Cell::Dead) => (born, died + 1),
                    _ => (born, died),
                },
            ),
            None => (0, 0),
        };

        Stats {
            generation: self.generation(),
            population,
            born,
            died,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            height: self.height,
            width: self.width,
            cells: self.current_cells().len(),
            neighbor_entries: self.neighbors.entry_count(),
        }
    }

    fn reset_history(&mut self, cells: Vec<Cell>) {
        self.history.clear();
        self.history.push(cells);
        self.cursor = 0;
    }
}

fn validate(height: usize, width: usize, actual: usize) -> Result<(), LifeError> {
    let expected = match height.checked_mul(width) {
        Some(expected) if expected > 0 => expected,
        _ => return Err(LifeError::InvalidDimensions { height, width }),
    };
    if actual != expected {
        return Err(LifeError::CellCountMismatch { expected, actual });
    }
    Ok(())
}

fn live_neighbors(cells: &[Cell], neighbors: &NeighborIndex, index: usize) -> u8 {
    neighbors
        .neighbors(index)
        .iter()
        .filter(|&&neighbor| cells[neighbor].is_alive())
        .count() as u8
}
