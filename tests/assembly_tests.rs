mod support;

use std::fs;
use std::path::PathBuf;

use support::sample_values;
use tokagen::assembly::{Assembly, AssemblyOptions};
use tokagen::deck::Deck;
use tokagen::export::Exporter;
use tokagen::params::ReactorParameters;
use tokagen::reactor::Reactor;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tokagen-{tag}-{}", std::process::id()))
}

fn line_index(deck: &Deck, needle: &str) -> usize {
    deck.lines()
        .iter()
        .position(|line| line.starts_with(needle))
        .unwrap_or_else(|| panic!("deck is missing `{needle}`"))
}

#[test]
fn exporter_writes_both_stl_flavours() {
    let dir = temp_dir("export");
    let exporter = Exporter::new(&dir).unwrap();
    let reactor = Reactor::new(ReactorParameters::decode(&sample_values()).unwrap())
        .with_segments(12);

    let binary = exporter
        .write_stl(&reactor.central_solenoid(), "solenoid")
        .unwrap();
    // 84-byte binary header plus 50 bytes per triangle
    assert!(fs::metadata(&binary).unwrap().len() > 84);

    let ascii = exporter
        .write_stl_ascii(&reactor.central_solenoid(), "solenoid_ascii")
        .unwrap();
    let text = fs::read_to_string(&ascii).unwrap();
    assert!(text.starts_with("solid solenoid_ascii"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn full_assembly_exports_and_declares_every_body() {
    let dir = temp_dir("assembly");
    let reactor = Reactor::new(ReactorParameters::decode(&sample_values()).unwrap())
        .with_segments(12);
    let exporter = Exporter::new(&dir).unwrap();

    let options = AssemblyOptions {
        body_line: 3,
        detector_line: 4,
        ..AssemblyOptions::default()
    };

    let mut deck = Deck::from_text("set title \"run\"\nset seed 42\nmid marker\nend marker\n");
    Assembly::new(&reactor, exporter, options)
        .run(&mut deck)
        .unwrap();

    // every reactor body got its STL
    for name in [
        "bbox",
        "plasma",
        "solenoid",
        "containment1",
        "containment2",
        "limb",
        "sphere0",
        "sphere15",
        "limiter_firstwall",
        "limiter_backwall",
        "divertor_firstwall",
        "divertor_backwall",
    ] {
        let path = dir.join(name).with_extension("stl");
        assert!(path.exists(), "missing export for {name}");
        assert!(fs::metadata(&path).unwrap().len() > 84);
    }

    // reactor-body records stay ahead of the first marker, detector records
    // between the markers, in build order
    let mid = line_index(&deck, "mid marker");
    let end = line_index(&deck, "end marker");
    let bbox = line_index(&deck, "body bbox");
    let plasma = line_index(&deck, "body plasma");
    let divertor_bw = line_index(&deck, "body divertor_backwall");
    let sphere0 = line_index(&deck, "body sphere0");
    let sphere15 = line_index(&deck, "body sphere15");

    assert!(bbox < plasma && plasma < divertor_bw && divertor_bw < mid);
    assert!(mid < sphere0 && sphere0 < sphere15 && sphere15 < end);

    // a body record is always chased by its file record
    assert!(deck.lines()[bbox + 1].starts_with("file bbox \""));
    // reactor groups are blank-line terminated, detector records are not
    assert_eq!(deck.lines()[bbox + 2], "");
    assert!(!deck.lines()[sphere0 + 2].is_empty());

    // two spheres per limb
    let sphere_bodies = deck
        .lines()
        .iter()
        .filter(|line| line.starts_with("body sphere"))
        .count();
    assert_eq!(sphere_bodies, 16);

    // default material assignments
    assert_eq!(deck.lines()[bbox], "body bbox bbox m21_1");
    assert_eq!(deck.lines()[plasma], "body plasma plasma void");
    let containment1 = line_index(&deck, "body containment1");
    assert_eq!(
        deck.lines()[containment1],
        "body containment1 containment1 m10_1"
    );

    let _ = fs::remove_dir_all(&dir);
}
