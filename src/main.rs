use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use toroidal_life::{
    config::{Cli, Mode},
    repl::{Session, SessionSettings},
    save::SaveDir,
    tui::{self, App},
    Life,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses the command line and runs the selected mode.
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let (height, width) = cli.dimensions();
    let mut rng = cli.rng();
    info!(height, width, mode = ?cli.mode(), "starting");

    match cli.mode() {
        Mode::Repl { no_clear } => {
            let settings = SessionSettings {
                percent: cli.percent,
                generations: cli.generations,
                clear_screen: !no_clear,
            };
            let saves = SaveDir::new(cli.saves_dir.clone());
            let mut session = Session::new(Life::new(height, width), rng, saves, settings);

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session.start(&mut stdout).context("failed to write frame")?;
            session
                .run(stdin.lock(), &mut stdout)
                .context("repl terminated")?;
        }
        Mode::Tui { tick_ms } => {
            let mut life = Life::new(height, width);
            life.randomize(cli.percent, &mut rng);
            let mut app = App::new(life, rng, cli.percent);
            tui::run(&mut app, Duration::from_millis(tick_ms))?;
        }
        Mode::Sim { from, to, max } => {
            let mut stdout = io::stdout().lock();
            for percent in from..=to {
                sim(height, width, percent, max, &mut rng, &mut stdout)?;
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Runs one random game to a loop or `max` generations and prints one line of metrics.
fn sim(
    height: usize,
    width: usize,
    percent: u8,
    max: usize,
    rng: &mut StdRng,
    out: &mut impl Write,
) -> Result<()> {
    let start = Instant::now();
    let mut life = Life::new(height, width);
    life.randomize(percent, rng);
    let outcome = life.run_out(max);
    let elapsed = start.elapsed();

    writeln!(
        out,
        "time: {:.4}s percent: {} generations: {} looped: {} {}",
        elapsed.as_secs_f64(),
        percent,
        outcome.generation,
        outcome.looped,
        life.summary().single_line()
    )?;
    Ok(())
}
