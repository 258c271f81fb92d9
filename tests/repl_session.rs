use std::{fs, io::Cursor};

use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;
use toroidal_life::{
    repl::{Command, Flow, Session, SessionSettings},
    save::SaveDir,
    Cell, Life,
};

const SETTINGS: SessionSettings = SessionSettings {
    percent: 50,
    generations: 20,
    clear_screen: false,
};

fn blinker() -> Life {
    let mut cells = vec![Cell::Dead; 36];
    for index in [14, 15, 16] {
        cells[index] = Cell::Alive;
    }
    Life::with_cells(6, 6, cells).unwrap()
}

fn run_script(session: &mut Session<StdRng>, script: &str) -> String {
    let mut out = Vec::new();
    session.run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn navigation_messages_at_history_edges() {
    let dir = tempdir().unwrap();
    let mut session = Session::new(
        blinker(),
        StdRng::seed_from_u64(1),
        SaveDir::new(dir.path()),
        SETTINGS,
    );

    let out = run_script(&mut session, "b\nf\n7\nq\n");
    assert!(out.contains("Already at first generation"));
    assert!(out.contains("Already at final generation"));
    assert!(out.contains("There is no generation 7"));
    assert_eq!(session.life().generation(), 1);
}

#[test]
fn run_then_browse_history() {
    let dir = tempdir().unwrap();
    let mut session = Session::new(
        blinker(),
        StdRng::seed_from_u64(1),
        SaveDir::new(dir.path()),
        SETTINGS,
    );

    let out = run_script(&mut session, "r\nb\n\n\ne\n2\n");
    assert!(out.contains("Loop detected at generation 3"));
    assert!(out.contains("Already at first generation"));
    assert!(out.contains("Generation: 2"));
    assert_eq!(session.life().generation(), 2);
    assert_eq!(session.life().history_len(), 3);
}

#[test]
fn save_and_load_through_commands() {
    let dir = tempdir().unwrap();
    let saves = SaveDir::new(dir.path());
    let mut session = Session::new(blinker(), StdRng::seed_from_u64(1), saves, SETTINGS);

    let mut out = Vec::new();
    assert_eq!(session.execute(Command::Save, &mut out).unwrap(), Flow::Continue);
    assert!(dir.path().join("life_1").is_file());

    session.execute(Command::Run(Some(1)), &mut out).unwrap();
    session
        .execute(Command::Load("life_1".to_string()), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Running out the game..."));
    assert_eq!(session.life().history()[0], blinker().current_cells());
    assert!(session.life().is_looping());
}

#[test]
fn failed_load_reports_and_keeps_state() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("broken"), "3\n3\n****").unwrap();
    let mut session = Session::new(
        blinker(),
        StdRng::seed_from_u64(1),
        SaveDir::new(dir.path()),
        SETTINGS,
    );
    let mut out = Vec::new();
    session.execute(Command::Run(Some(1)), &mut out).unwrap();
    let before = session.life().history().to_vec();

    let out = run_script(&mut session, "l broken\nl missing\nq\n");
    assert!(out.contains("Failed to load broken: expected 9 cells for the grid, found 4"));
    assert!(out.contains("Failed to load missing"));
    assert_eq!(session.life().history(), before.as_slice());
    assert_eq!(session.life().generation(), 2);
}

#[test]
fn again_randomizes_and_runs_out() {
    let dir = tempdir().unwrap();
    let mut session = Session::new(
        Life::new(12, 12),
        StdRng::seed_from_u64(5),
        SaveDir::new(dir.path()),
        SETTINGS,
    );
    let out = run_script(&mut session, "a\n");
    assert!(out.contains("Running out the game..."));
    let life = session.life();
    assert!(life.history_len() <= SETTINGS.generations);
    assert!(life.history_len() == SETTINGS.generations || life.is_looping());
}
