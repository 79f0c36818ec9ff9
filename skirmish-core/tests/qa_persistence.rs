//! QA tests for the flat binary roster format: round trips, the
//! end-of-stream marker, and malformed input.

use skirmish_core::{
    load_roster, read_roster, save_roster, write_roster, Character, PersistError, Position,
};
use std::io::Cursor;

fn sample_roster() -> Vec<Character> {
    vec![
        Character::player("Hero", Position::new(0, 0), 100, 25, 10),
        Character::enemy("Enemy#1", Position::new(1, 1), 75, 0, 18),
        Character::enemy("Enemy#2", Position::new(0, 3), -10, 0, 22),
        Character::enemy("Enemy#3", Position::new(2, 2), 143, 50, 15),
        Character::enemy("Enemy#4", Position::new(3, 0), 1, 3, 30),
    ]
}

fn round_trip(characters: &[Character]) -> Vec<Character> {
    let mut buffer = Vec::new();
    write_roster(&mut buffer, characters).expect("write");
    read_roster(&mut Cursor::new(buffer)).expect("read")
}

#[test]
fn empty_roster_round_trips() {
    assert_eq!(round_trip(&[]), Vec::<Character>::new());
}

#[test]
fn single_character_round_trips() {
    let roster = vec![Character::player("Hero", Position::new(1, 0), 100, 0, 10)];
    assert_eq!(round_trip(&roster), roster);
}

#[test]
fn five_character_roster_round_trips_exactly() {
    // Includes an armor-0 character and one already dead.
    let roster = sample_roster();
    let loaded = round_trip(&roster);
    assert_eq!(loaded, roster);
    assert!(loaded[2].is_dead());
    assert!(loaded[0].is_player());
    assert!(!loaded[1].is_player());
}

#[test]
fn empty_name_is_rejected_before_anything_is_written() {
    let roster = vec![
        Character::player("Hero", Position::new(0, 0), 100, 0, 10),
        Character::enemy("", Position::new(1, 1), 50, 0, 15),
    ];
    let mut buffer = Vec::new();
    let err = write_roster(&mut buffer, &roster).expect_err("empty name");
    assert!(matches!(err, PersistError::EmptyName { index: 1 }));
    assert!(buffer.is_empty(), "a failed save must write nothing");
}

#[test]
fn zero_name_length_terminates_the_stream_early() {
    let roster = sample_roster();
    let mut buffer = Vec::new();
    write_roster(&mut buffer, &roster).expect("write");

    // One record is 4 (length) + name + 5*4 (ints) + 2 (flags) bytes.
    // Zero out the second record's length field: everything after it is
    // ignored.
    let first_record = 4 + roster[0].name.len() + 20 + 2;
    buffer[first_record..first_record + 4].copy_from_slice(&0u32.to_le_bytes());

    let loaded = read_roster(&mut Cursor::new(buffer)).expect("read");
    assert_eq!(loaded.as_slice(), &roster[..1]);
}

#[test]
fn clean_eof_is_accepted_in_place_of_the_marker() {
    let roster = sample_roster();
    let mut buffer = Vec::new();
    write_roster(&mut buffer, &roster).expect("write");
    buffer.truncate(buffer.len() - 4); // drop the trailing marker

    let loaded = read_roster(&mut Cursor::new(buffer)).expect("read");
    assert_eq!(loaded, roster);
}

#[test]
fn truncated_record_is_an_io_error() {
    let roster = sample_roster();
    let mut buffer = Vec::new();
    write_roster(&mut buffer, &roster).expect("write");
    buffer.truncate(14); // mid-way through the first record

    let err = read_roster(&mut Cursor::new(buffer)).expect_err("truncated");
    assert!(matches!(err, PersistError::Io(_)));
}

#[test]
fn flag_bytes_other_than_zero_or_one_are_rejected() {
    let roster = vec![Character::player("Hero", Position::new(0, 0), 100, 0, 10)];
    let mut buffer = Vec::new();
    write_roster(&mut buffer, &roster).expect("write");

    // The dead flag is the second-to-last byte of the record.
    let dead_flag = 4 + roster[0].name.len() + 20;
    buffer[dead_flag] = 2;

    let err = read_roster(&mut Cursor::new(buffer)).expect_err("bad flag");
    assert!(matches!(err, PersistError::BadFlag { index: 0, value: 2 }));
}

#[test]
fn dead_flag_on_disk_matches_derived_death() {
    let roster = vec![
        Character::player("Hero", Position::new(0, 0), -3, 0, 10),
        Character::enemy("Enemy#1", Position::new(1, 1), 40, 0, 15),
    ];
    let mut buffer = Vec::new();
    write_roster(&mut buffer, &roster).expect("write");

    let dead_flag = 4 + roster[0].name.len() + 20;
    assert_eq!(buffer[dead_flag], 1, "negative health writes a set flag");

    let loaded = read_roster(&mut Cursor::new(buffer)).expect("read");
    assert!(loaded[0].is_dead());
    assert!(!loaded[1].is_dead());
}

#[test]
fn save_and_load_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roster.sav");

    let roster = sample_roster();
    save_roster(&path, &roster).expect("save");
    let loaded = load_roster(&path).expect("load");
    assert_eq!(loaded, roster);
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_roster(dir.path().join("missing.sav")).expect_err("missing file");
    assert!(matches!(err, PersistError::Io(_)));
}
