//! Real-time terminal viewer built on `ratatui` and `crossterm`.
//!
//! The engine lives on the UI thread, so every frame is drawn from a complete
//! `history[cursor]` between simulation steps.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use rand::Rng;
use sysinfo::{System, SystemExt};
use tracing::info;

use crate::life::Life;

/// Viewer state: the engine plus play/pause and resource monitoring.
pub struct App<R> {
    /// The simulation being shown
    life: Life,
    /// Source for re-randomizing the grid
    rng: R,
    /// Chance, in percent, of a cell starting alive
    percent: u8,
    /// Indicates whether the simulation advances on every tick
    running: bool,
    /// System information for resource monitoring
    sys: System,
}

impl<R: Rng> App<R> {
    /// Creates a paused viewer over `life`.
    pub fn new(life: Life, rng: R, percent: u8) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        App {
            life,
            rng,
            percent,
            running: false,
            sys,
        }
    }

    pub fn life(&self) -> &Life {
        &self.life
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances one generation, pausing once the newest frame repeats.
    pub fn step(&mut self) {
        self.life.advance();
        if self.life.is_looping() {
            info!(generation = self.life.generation(), "loop detected, pausing");
            self.running = false;
        }
        self.sys.refresh_memory();
    }

    /// Called on every tick of the event loop.
    pub fn on_tick(&mut self) {
        if self.running {
            self.step();
        }
    }

    /// Applies a key press. Returns `true` when the viewer should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(' ') => self.running = !self.running,
            KeyCode::Enter => {
                if !self.running {
                    self.step();
                }
            }
            KeyCode::Left => {
                self.running = false;
                self.life.rewind(1);
            }
            KeyCode::Right => {
                self.running = false;
                self.life.forward(1);
            }
            KeyCode::Home => {
                self.running = false;
                self.life.jump_to_first();
            }
            KeyCode::End => self.life.jump_to_last(),
            KeyCode::Char('r') => {
                self.life.randomize(self.percent, &mut self.rng);
                self.running = false;
            }
            _ => {}
        }
        false
    }

    fn status(&self) -> &'static str {
        if self.running {
            "Running"
        } else if self.life.generation() == self.life.history_len() && self.life.is_looping() {
            "Loop detected"
        } else {
            "Paused"
        }
    }
}

/// Draws the game grid to the terminal interface.
fn draw_grid<R: Rng>(f: &mut ratatui::Frame, app: &App<R>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Game of Life [Space: Play/Pause | Enter: Step | ←/→ Home/End: History | r: Randomize | q: Quit]");

    let width = app.life.width();
    let mut cells = String::with_capacity(app.life.current_cells().len() + app.life.height());
    for row in app.life.current_cells().chunks(width) {
        cells.extend(row.iter().map(|cell| if cell.is_alive() { '█' } else { ' ' }));
        cells.push('\n');
    }

    let paragraph = Paragraph::new(cells)
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Draws the statistics panel to the terminal interface.
fn draw_stats<R: Rng>(f: &mut ratatui::Frame, app: &App<R>, area: Rect) {
    let stats = app.life.stats();
    let memory_used = app.sys.used_memory() / 1024; // Convert to KB
    let memory_total = app.sys.total_memory() / 1024;

    let stats_text = format!(
        "Generation: {} of {}\n\
        Population: {}\n\
        Born: {}\n\
        Died: {}\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n",
        stats.generation,
        app.life.history_len(),
        stats.population,
        stats.born,
        stats.died,
        memory_used,
        memory_total as f64 / 1024.0,
        app.status()
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

/// Runs the viewer until `q` is pressed, advancing once per `tick_rate` while playing.
///
/// # Errors
///
/// Returns an error if terminal manipulation fails.
pub fn run<R: Rng>(app: &mut App<R>, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;

    let result = event_loop(&mut terminal, app, tick_rate);

    if let Err(err) = disable_raw_mode() {
        tracing::error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    ) {
        tracing::error!(?err, "failed to leave alternate screen");
    }
    terminal.show_cursor().ok();

    result
}

fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            draw_grid(f, app, chunks[0]);
            draw_stats(f, app, chunks[1]);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
