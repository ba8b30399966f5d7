//! Integration tests for marker file loading

use markers::source::MarkerFile;
use markers::MarkerStore;

use crate::helpers::{fixture, fixtures_dir, temp_fixture};

#[test]
fn json_object_with_duration() {
    let file = MarkerFile::load(fixture("chapters.json")).unwrap();
    assert_eq!(file.duration, Some(60.0));
    assert_eq!(file.markers.len(), 3);
    assert_eq!(file.markers[1].text.as_deref(), Some("Intro"));
    assert_eq!(file.markers[1].duration, 5.0);
    assert_eq!(file.markers[0].class_name.as_deref(), Some("chapter"));
}

#[test]
fn json_bare_array() {
    let file = MarkerFile::load(fixture("bare_list.json")).unwrap();
    assert_eq!(file.duration, None);
    let times: Vec<f64> = file.markers.iter().map(|m| m.time).collect();
    assert_eq!(times, vec![2.5, 1.0]);
}

#[test]
fn toml_marker_tables() {
    let file = MarkerFile::load(fixtures_dir().join("chapters.toml")).unwrap();
    assert_eq!(file.duration, Some(60.0));
    let texts: Vec<_> = file.markers.iter().map(|m| m.text.as_deref()).collect();
    assert_eq!(texts, vec![Some("Intro"), Some("Break"), Some("Bonus")]);
}

#[test]
fn cast_marker_events() {
    let (_temp_dir, path) = temp_fixture("session.cast");
    let file = MarkerFile::load(&path).unwrap();
    assert_eq!(file.duration, Some(5.5));
    let times: Vec<f64> = file.markers.iter().map(|m| m.time).collect();
    assert_eq!(times, vec![2.0, 5.0]);
    assert_eq!(file.markers[0].text.as_deref(), Some("Build started"));
    assert_eq!(file.markers[1].text, None);
}

#[test]
fn loaded_markers_order_in_store() {
    let file = MarkerFile::load(fixture("chapters.json")).unwrap();
    let mut store = MarkerStore::new();
    store.add_all(file.markers).unwrap();

    let texts: Vec<_> = store.ordered_values().iter().map(|m| m.text()).collect();
    assert_eq!(texts, vec![Some("Intro"), Some("Middle"), Some("Outro")]);
}

#[test]
fn invalid_marker_rejects_whole_batch() {
    let file = MarkerFile::load(fixture("invalid_time.json")).unwrap();
    let mut store = MarkerStore::new();
    assert!(store.add_all(file.markers).is_err());
    assert!(store.is_empty());
}
