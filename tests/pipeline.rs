//! End-to-end tests over the sample fixture.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use vents::{
    parse_document, spawns_from_path, spawns_from_text, ParseOptions, Position, PropertyValue,
    Team, VentsError,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

#[test]
fn test_sample_spawns() {
    let spawns = spawns_from_path(&fixture("sample.vents"), &ParseOptions::default()).unwrap();

    assert_eq!(
        spawns.t,
        vec![
            Position::new(-767.0, -808.0, 96.03125),
            Position::new(-672.0, -808.0, 96.03125),
        ]
    );
    assert_eq!(
        spawns.ct,
        vec![
            Position::new(256.0, 2480.0, -120.0),
            Position::new(192.0, 2416.0, -126.5),
        ]
    );
}

#[test]
fn test_sample_document_shape() {
    let doc = parse_document(&load_fixture("sample.vents"));

    assert_eq!(doc.ids().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);

    // The header line before the first marker lands in block 0 alongside worldspawn
    let world = doc.get(0).unwrap();
    assert_eq!(world.get("mapversion"), Some(&PropertyValue::Integer(412)));
    assert_eq!(world.classname(), Some("worldspawn"));

    // `targetname` has no value and is dropped
    assert!(!doc.get(1).unwrap().contains_key("targetname"));

    let light = doc.get(8).unwrap();
    assert_eq!(
        light.get("color"),
        Some(&PropertyValue::Text("255 239 208 255".to_string()))
    );
    assert_eq!(light.get("brightness"), Some(&PropertyValue::Float(0.75)));
}

#[test]
fn test_no_block_is_both_teams() {
    let source = load_fixture("sample.vents");
    let doc = parse_document(&source);
    let spawns = spawns_from_text(&source).unwrap();

    // Each selected block contributes exactly one position overall
    let selected = doc
        .iter()
        .filter(|block| {
            block.classname().and_then(Team::from_classname).is_some()
                && block.get("enabled") == Some(&PropertyValue::Boolean(true))
                && block.get("priority") == Some(&PropertyValue::Integer(0))
        })
        .count();
    assert_eq!(selected, 4);
    assert_eq!(spawns.len(), selected);
    assert!(spawns.len() <= doc.len());
}

#[test]
fn test_shared_origin_lands_once_per_team() {
    let source = "====1====\nclassname info_player_terrorist\nenabled True\npriority 0\norigin 8.0 8.0 8.0\n\
                  ====2====\nclassname info_player_counterterrorist\nenabled True\npriority 0\norigin 8.0 8.0 8.0\n";

    let spawns = spawns_from_text(source).unwrap();

    assert_eq!(spawns.get(Team::Terrorist), &[Position::new(8.0, 8.0, 8.0)]);
    assert_eq!(spawns.get(Team::CounterTerrorist), &[Position::new(8.0, 8.0, 8.0)]);
    assert_eq!(spawns.len(), 2);
}

#[test]
fn test_sample_json_output() {
    let spawns = spawns_from_text(&load_fixture("sample.vents")).unwrap();

    let json = spawns.to_json(false).unwrap();

    assert!(json.starts_with(r#"{"CT":[{"x":256.0,"y":2480.0,"z":-120.0}"#));
    assert!(json.contains(r#""T":[{"x":-767.0,"y":-808.0,"z":96.03125}"#));
}

#[test]
fn test_truncated_fixture_fails_on_spawn_without_origin() {
    let source = load_fixture("sample.vents").replace("origin 256.0 2480.0 -120.0\n", "");

    let err = spawns_from_text(&source).unwrap_err();

    assert!(matches!(
        err,
        VentsError::MalformedSpawnRecord { block: 4, .. }
    ));
}
