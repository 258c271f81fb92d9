//! Line-oriented command loop for browsing a finished run.

use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use rand::Rng;
use tracing::{debug, warn};

use crate::{life::Life, render, save::SaveDir};

pub const PROMPT: &str = "[b]ack, [f]orward, [s]tart, [e]nd, [q]uit >> ";

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Back,
    Forward,
    Start,
    End,
    /// Jump to a 1-based generation number.
    Goto(usize),
    /// Print grid shape and history size.
    Info,
    /// Save the current frame to the next numbered file.
    Save,
    /// Load a save file by name and run it out.
    Load(String),
    /// Randomize a new grid and run it out.
    Again,
    /// Advance from the current frame, by the given count or the generation cap.
    Run(Option<usize>),
    Quit,
    /// Blank line: repeat the last back/forward.
    Repeat,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Command {
        let input = input.trim();
        if input.is_empty() {
            return Command::Repeat;
        }
        if let Ok(generation) = input.parse::<usize>() {
            return Command::Goto(generation);
        }

        let mut words = input.split_whitespace();
        let head = words.next().unwrap_or_default().to_lowercase();
        let argument = words.last();
        match head.chars().next() {
            Some('b') => Command::Back,
            Some('f') => Command::Forward,
            Some('s') => Command::Start,
            Some('e') => Command::End,
            Some('p') => Command::Info,
            Some('d') => Command::Save,
            Some('l') => match argument {
                Some(name) => Command::Load(name.to_string()),
                None => Command::Unknown(input.to_string()),
            },
            Some('a') => Command::Again,
            Some('r') => Command::Run(argument.and_then(|count| count.parse().ok())),
            Some('q') => Command::Quit,
            _ => Command::Unknown(input.to_string()),
        }
    }
}

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Forward,
}

/// Settings for randomizing and running out new grids.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Chance, in percent, of a cell starting alive
    pub percent: u8,
    /// Generation cap for run-outs
    pub generations: usize,
    /// Clear the terminal before every printed frame
    pub clear_screen: bool,
}

/// An interactive session over one engine.
pub struct Session<R> {
    life: Life,
    rng: R,
    saves: SaveDir,
    settings: SessionSettings,
    previous: Option<Step>,
}

impl<R: Rng> Session<R> {
    pub fn new(life: Life, rng: R, saves: SaveDir, settings: SessionSettings) -> Self {
        Session {
            life,
            rng,
            saves,
            settings,
            previous: None,
        }
    }

    pub fn life(&self) -> &Life {
        &self.life
    }

    pub fn into_life(self) -> Life {
        self.life
    }

    /// Randomizes a fresh grid, runs it out and prints where it stopped.
    pub fn start<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.life.randomize(self.settings.percent, &mut self.rng);
        self.run_out(out)
    }

    /// Reads commands from `input` until `q` or end of input.
    pub fn run<I: BufRead, W: Write>(&mut self, input: I, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if self.execute(Command::parse(&line), out)? == Flow::Quit {
                break;
            }
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "repl command");
        match command {
            Command::Back => self.step(Step::Back, out)?,
            Command::Forward => self.step(Step::Forward, out)?,
            Command::Repeat => {
                if let Some(step) = self.previous {
                    self.step(step, out)?;
                }
            }
            Command::Start => {
                self.life.jump_to_first();
                self.print_frame(out)?;
            }
            Command::End => {
                self.life.jump_to_last();
                self.print_frame(out)?;
            }
            Command::Goto(generation) => {
                if self.life.set_generation(generation) {
                    self.print_frame(out)?;
                } else {
                    writeln!(out, "There is no generation {generation}")?;
                }
            }
            Command::Info => {
                writeln!(out, "{}", self.life.summary())?;
                writeln!(out, "generations:      {}", self.life.history_len())?;
            }
            Command::Save => match self.saves.save(&self.life) {
                Ok(path) => writeln!(out, "Saved to {}", path.display())?,
                Err(err) => {
                    warn!(%err, "save failed");
                    writeln!(out, "Failed to save: {err}")?;
                }
            },
            Command::Load(name) => match self.saves.load_into(&name, &mut self.life) {
                Ok(()) => self.run_out(out)?,
                Err(err) => {
                    warn!(%err, %name, "load failed");
                    writeln!(out, "Failed to load {name}: {err}")?;
                }
            },
            Command::Again => self.start(out)?,
            Command::Run(count) => {
                let outcome = self.life.run(count.unwrap_or(self.settings.generations));
                self.print_frame(out)?;
                if outcome.looped {
                    writeln!(out, "Loop detected at generation {}", outcome.generation)?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(input) => writeln!(out, "Unknown command: {input}")?,
        }
        Ok(Flow::Continue)
    }

    fn step<W: Write>(&mut self, step: Step, out: &mut W) -> io::Result<()> {
        self.previous = Some(step);
        let (moved, edge) = match step {
            Step::Back => (self.life.rewind(1), "first"),
            Step::Forward => (self.life.forward(1), "final"),
        };
        if moved {
            self.print_frame(out)
        } else {
            writeln!(out, "Already at {edge} generation")
        }
    }

    fn run_out<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Running out the game...")?;
        let outcome = self.life.run_out(self.settings.generations);
        self.print_frame(out)?;
        if outcome.looped {
            writeln!(out, "Loop detected at generation {}", outcome.generation)?;
        }
        Ok(())
    }

    fn print_frame<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.settings.clear_screen {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        render::write_frame(out, &self.life)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_letters() {
        assert_eq!(Command::parse("b"), Command::Back);
        assert_eq!(Command::parse("  Forward "), Command::Forward);
        assert_eq!(Command::parse("s"), Command::Start);
        assert_eq!(Command::parse("end"), Command::End);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Repeat);
    }

    #[test]
    fn parses_numbers_as_goto() {
        assert_eq!(Command::parse("12"), Command::Goto(12));
        assert_eq!(Command::parse("0"), Command::Goto(0));
    }

    #[test]
    fn load_keeps_file_name_case() {
        assert_eq!(Command::parse("l Life_3"), Command::Load("Life_3".to_string()));
        assert_eq!(Command::parse("load"), Command::Unknown("load".to_string()));
    }

    #[test]
    fn run_takes_optional_count() {
        assert_eq!(Command::parse("r"), Command::Run(None));
        assert_eq!(Command::parse("r 25"), Command::Run(Some(25)));
        assert_eq!(Command::parse("run soon"), Command::Run(None));
    }

    #[test]
    fn other_input_is_unknown() {
        assert_eq!(Command::parse("zap"), Command::Unknown("zap".to_string()));
        assert_eq!(Command::parse("-3"), Command::Unknown("-3".to_string()));
    }
}
