//! Integration tests driving a MarkerOverlay like a host player

use std::cell::RefCell;
use std::rc::Rc;

use markers::overlay::{Host, SimulatedPlayer};
use markers::source::MarkerFile;
use markers::{MarkerOverlay, TrackerConfig};

use crate::helpers::fixture;

type Reached = Rc<RefCell<Vec<String>>>;

fn chapters_overlay() -> (MarkerOverlay<SimulatedPlayer>, Reached) {
    let file = MarkerFile::load(fixture("chapters.json")).unwrap();
    let reached: Reached = Rc::default();
    let sink = Rc::clone(&reached);

    let player = SimulatedPlayer::new(file.duration);
    let mut overlay = MarkerOverlay::new(player, TrackerConfig::default()).with_callback(
        move |_, marker| {
            let text = marker.text().unwrap_or_default().to_string();
            sink.borrow_mut().push(text);
        },
    );
    overlay.add_all(file.markers).unwrap();
    (overlay, reached)
}

#[test]
fn playback_reports_markers_in_order() {
    let (mut overlay, reached) = chapters_overlay();

    for second in 1..=60 {
        overlay.host_mut().play_to(second as f64);
        overlay.on_time_update();
    }

    assert_eq!(*reached.borrow(), vec!["Intro", "Middle", "Outro"]);
    assert_eq!(overlay.tracker().remaining(overlay.store()).len(), 0);
}

#[test]
fn coarse_tick_reports_every_crossed_marker() {
    let (mut overlay, reached) = chapters_overlay();

    overlay.host_mut().play_to(50.0);
    assert_eq!(overlay.on_time_update(), 3);
    assert_eq!(overlay.on_time_update(), 0);
    assert_eq!(reached.borrow().len(), 3);
}

#[test]
fn chapter_navigation_seeks_host() {
    let (mut overlay, _reached) = chapters_overlay();

    let first = overlay.next().unwrap();
    assert_eq!(first.text(), Some("Intro"));
    assert_eq!(overlay.host().current_time(), 10.0);

    overlay.on_seeking();
    overlay.on_seeked();

    let second = overlay.next().unwrap();
    assert_eq!(second.text(), Some("Middle"));
    assert_eq!(overlay.host().current_time(), 30.0);

    let back = overlay.prev().unwrap();
    assert_eq!(back.text(), Some("Middle"));
    assert_eq!(overlay.host().current_time(), 30.0);

    let back = overlay.prev().unwrap();
    assert_eq!(back.text(), Some("Intro"));
    assert_eq!(overlay.host().current_time(), 10.0);
    assert!(overlay.prev().is_none());
}

#[test]
fn duration_change_moves_placements() {
    let (mut overlay, _reached) = chapters_overlay();

    let placements = overlay.on_duration_change();
    assert_eq!(placements.iter().filter(|p| p.visible).count(), 3);

    overlay.host_mut().set_duration(Some(20.0));
    let placements = overlay.on_duration_change();
    let visible: Vec<bool> = placements.iter().map(|p| p.visible).collect();
    assert_eq!(visible, vec![true, false, false]);
}

#[test]
fn dispose_returns_host() {
    let (mut overlay, _reached) = chapters_overlay();
    overlay.host_mut().play_to(12.0);
    let player = overlay.dispose();
    assert_eq!(player.current_time(), 12.0);
}
