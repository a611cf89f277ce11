use std::fs;

use tokagen::deck::Deck;

fn sample_deck() -> Deck {
    Deck::from_text("set title \"run\"\nset seed 42\nmid marker\nend marker\n")
}

#[test]
fn body_record_format() {
    let mut deck = sample_deck();
    let cursor = deck.cursor(3);
    deck.body(cursor, "solenoid", "m8_1");
    assert_eq!(deck.lines()[2], "body solenoid solenoid m8_1");
}

#[test]
fn file_record_format() {
    let mut deck = sample_deck();
    let cursor = deck.cursor(3);
    deck.file(cursor, "plasma", "stls/plasma.stl", 1.0, false);
    assert_eq!(deck.lines()[2], "file plasma \"stls/plasma.stl\" 1 0 0 0");
}

#[test]
fn records_advance_the_cursor_in_order() {
    let mut deck = sample_deck();
    let cursor = deck.cursor(3);
    deck.body(cursor, "bbox", "m21_1");
    deck.file(cursor, "bbox", "stls/bbox.stl", 1.0, false);
    deck.body(cursor, "plasma", "void");

    let lines = deck.lines();
    assert_eq!(lines[1], "set seed 42");
    assert_eq!(lines[2], "body bbox bbox m21_1");
    assert_eq!(lines[3], "file bbox \"stls/bbox.stl\" 1 0 0 0");
    assert_eq!(lines[4], "body plasma plasma void");
    assert_eq!(lines[5], "mid marker");
}

#[test]
fn last_flag_terminates_the_group_with_a_blank_line() {
    let mut deck = sample_deck();
    let cursor = deck.cursor(3);
    deck.body(cursor, "bbox", "m21_1");
    deck.file(cursor, "bbox", "stls/bbox.stl", 1.0, true);
    deck.body(cursor, "plasma", "void");

    let lines = deck.lines();
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "body plasma plasma void");
}

#[test]
fn independent_cursors_keep_their_relative_order() {
    let mut deck = sample_deck();
    let bodies = deck.cursor(3);
    let detectors = deck.cursor(4);

    // interleave in time; document order must follow the cursors
    deck.body(detectors, "sphere0", "void");
    deck.body(bodies, "bbox", "m21_1");
    deck.body(bodies, "solenoid", "m8_1");
    deck.body(detectors, "sphere1", "void");

    let lines = deck.lines();
    assert_eq!(lines[2], "body bbox bbox m21_1");
    assert_eq!(lines[3], "body solenoid solenoid m8_1");
    assert_eq!(lines[4], "mid marker");
    assert_eq!(lines[5], "body sphere0 sphere0 void");
    assert_eq!(lines[6], "body sphere1 sphere1 void");
    assert_eq!(lines[7], "end marker");
}

#[test]
fn cursor_past_the_end_appends() {
    let mut deck = Deck::from_text("only line\n");
    let cursor = deck.cursor(99);
    deck.body(cursor, "bbox", "m21_1");
    assert_eq!(deck.lines()[1], "body bbox bbox m21_1");
}

#[test]
fn save_and_reopen_roundtrips() {
    let path = std::env::temp_dir().join(format!("tokagen-deck-{}.i", std::process::id()));

    let mut deck = sample_deck();
    let cursor = deck.cursor(2);
    deck.body(cursor, "limb", "m8_1");
    deck.save(&path).unwrap();

    let reopened = Deck::open(&path).unwrap();
    assert_eq!(reopened.lines(), deck.lines());

    let _ = fs::remove_file(&path);
}
