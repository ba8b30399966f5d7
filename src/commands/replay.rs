//! `markers replay` handler

use std::path::Path;

use anyhow::{bail, Result};

use markers::overlay::{Playthrough, ReplayEvent, SeekPlan};
use markers::source::MarkerFile;

use super::{format_timestamp, load_config};

/// Simulate playback of `file` and print every reached marker.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config_path: Option<&Path>,
    file: &Path,
    duration: Option<f64>,
    tick: Option<f64>,
    seeks: Vec<SeekPlan>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let marker_file = MarkerFile::load(file)?;

    let Some(duration) = duration.or(marker_file.duration) else {
        bail!("No duration known for {}; pass --duration SECS", file.display());
    };
    if !duration.is_finite() || duration <= 0.0 {
        bail!("Duration must be a positive number of seconds, got {}", duration);
    }

    let tick = tick.unwrap_or(config.replay.tick);
    let events = Playthrough::new(duration, tick)
        .with_seeks(seeks)
        .run(marker_file.markers, config.tracker_config())?;

    let reached = events
        .iter()
        .filter(|e| matches!(e, ReplayEvent::Reached { .. }))
        .count();
    for event in &events {
        println!("{}", format_event(event));
    }
    println!("{} marker(s) reached", reached);
    Ok(())
}

fn format_event(event: &ReplayEvent) -> String {
    match event {
        ReplayEvent::Reached { position, marker } => {
            let mut line = format!(
                "{}  reached #{} at {}",
                format_timestamp(*position),
                marker.id(),
                format_timestamp(marker.time())
            );
            if let Some(text) = marker.text() {
                line.push_str(&format!("  {}", text));
            }
            line
        }
        ReplayEvent::Seeked { from, to } => format!(
            "{}  seek -> {}",
            format_timestamp(*from),
            format_timestamp(*to)
        ),
    }
}
