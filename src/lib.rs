//! # Toroidal Life
//!
//! Conway's Game of Life on a fixed-size wraparound grid, keeping every
//! generation computed so far so it can be browsed backwards and forwards.
//!
//! ## Features
//!
//! * Precomputed toroidal neighbor index
//! * Full generation history with rewind, forward and jump-to
//! * Detection of still lifes and period-2 oscillators
//! * Save files holding the current frame
//! * Console prompt and full-screen terminal viewer

pub mod cell;
pub mod config;
pub mod error;
pub mod life;
pub mod neighbors;
pub mod render;
pub mod repl;
pub mod save;
pub mod tui;

pub use cell::Cell;
pub use error::LifeError;
pub use life::{Life, NeighborCounts, RunOutcome, Stats, Summary};
pub use neighbors::NeighborIndex;
