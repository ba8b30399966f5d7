//! `markers list` handler

use std::path::Path;

use anyhow::Result;

use markers::overlay::{MarkerOverlay, MarkerPlacement, SimulatedPlayer};
use markers::source::MarkerFile;
use markers::Marker;

use super::{format_timestamp, load_config};

/// Print the markers of `file` in timeline order.
#[cfg(not(tarpaulin_include))]
pub fn handle(config_path: Option<&Path>, file: &Path, duration: Option<f64>) -> Result<()> {
    let config = load_config(config_path)?;
    let marker_file = MarkerFile::load(file)?;
    let duration = duration.or(marker_file.duration);

    let mut overlay = MarkerOverlay::new(SimulatedPlayer::new(duration), config.tracker_config());
    overlay.add_all(marker_file.markers)?;

    if overlay.markers().is_empty() {
        println!("No markers in {}", file.display());
        return Ok(());
    }

    let placements = overlay.on_duration_change();
    for (marker, placement) in overlay.markers().iter().zip(&placements) {
        let placement = duration.map(|_| placement);
        println!("{}", format_line(marker, placement));
    }
    Ok(())
}

/// One listing line: `#id  MM:SS.mmm  text  [class]  position`.
fn format_line(marker: &Marker, placement: Option<&MarkerPlacement>) -> String {
    let mut line = format!("#{}  {}", marker.id(), format_timestamp(marker.time()));
    if marker.duration() > 0.0 {
        line.push_str(&format!("-{}", format_timestamp(marker.end_time())));
    }
    if let Some(text) = marker.text() {
        line.push_str(&format!("  {}", text));
    }
    if let Some(class_name) = marker.class_name() {
        line.push_str(&format!("  [{}]", class_name));
    }
    match placement {
        Some(p) if p.visible => line.push_str(&format!("  {:.1}%", p.left * 100.0)),
        Some(_) => line.push_str("  hidden"),
        None => {}
    }
    line
}
