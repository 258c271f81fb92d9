use std::fs;

use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;
use toroidal_life::{
    save::{self, SaveDir, SavedGrid},
    Life, LifeError,
};

#[test]
fn saved_frame_loads_back_into_a_fresh_engine() {
    let dir = tempdir().unwrap();
    let saves = SaveDir::new(dir.path());
    let mut rng = StdRng::seed_from_u64(77);
    let mut life = Life::new(7, 11);
    life.randomize(35, &mut rng);
    life.advance();
    life.advance();
    life.rewind(1);

    let path = saves.save(&life).unwrap();
    assert_eq!(path, dir.path().join("life_1"));

    let mut other = Life::new(2, 2);
    saves.load_into("life_1", &mut other).unwrap();
    assert_eq!((other.height(), other.width()), (7, 11));
    assert_eq!(other.current_cells(), life.current_cells());
    assert_eq!(other.history_len(), 1);
}

#[test]
fn next_path_skips_past_highest_number() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("life_2"), "").unwrap();
    fs::write(dir.path().join("life_9"), "").unwrap();
    fs::write(dir.path().join("notes"), "").unwrap();
    fs::create_dir(dir.path().join("life_40")).unwrap();

    let saves = SaveDir::new(dir.path());
    assert_eq!(saves.next_path().unwrap(), dir.path().join("life_10"));
}

#[test]
fn next_path_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let saves = SaveDir::new(dir.path().join("saves"));
    assert_eq!(saves.next_path().unwrap(), dir.path().join("saves").join("life_1"));
    assert!(dir.path().join("saves").is_dir());
}

#[test]
fn written_file_has_header_and_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid");
    let life = Life::with_cells(2, 3, SavedGrid::parse("2\n3\n*  ** ").unwrap().cells).unwrap();

    save::save_file(&life, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "2\n3\n*  \n** \n");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = save::load_file(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, LifeError::Io(_)));
}
