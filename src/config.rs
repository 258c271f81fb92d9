//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
#[command(
    name = "toroidal-life",
    version,
    about = "Conway's Game of Life on a wraparound grid, with browsable history"
)]
pub struct Cli {
    /// Number of rows in the grid.
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u64).range(1..))]
    pub height: u64,

    /// Number of columns in the grid.
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(u64).range(1..))]
    pub width: u64,

    /// Chance, in percent, of each cell starting alive.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent: u8,

    /// Stop running out a game after this many generations.
    #[arg(long, default_value_t = 6000)]
    pub generations: usize,

    /// Seed for the random grid; a fresh seed is drawn when omitted.
    #[arg(long, env = "LIFE_SEED")]
    pub seed: Option<u64>,

    /// Directory for save files.
    #[arg(long, default_value = "saves")]
    pub saves_dir: PathBuf,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run out a random game, then browse it from a prompt (default).
    Repl {
        /// Do not clear the terminal between frames.
        #[arg(long)]
        no_clear: bool,
    },
    /// Watch the game in a full-screen terminal view.
    Tui {
        /// Milliseconds between generations while playing.
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,
    },
    /// Measure how long random games take to settle, one line per percent.
    Sim {
        /// First percent to try.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=100))]
        from: u8,
        /// Last percent to try.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
        to: u8,
        /// Generation cap for each game.
        #[arg(long, default_value_t = 5000)]
        max: usize,
    },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode
            .clone()
            .unwrap_or(Mode::Repl { no_clear: false })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
