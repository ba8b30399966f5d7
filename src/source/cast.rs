//! Marker extraction from asciicast v3 recordings.
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v3/
//!
//! Only the parts needed for markers are read: the header line (for the
//! version and duration) and the `[interval, code, data]` event lines. Every
//! `"m"` event becomes a marker at its cumulative time.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::marker::MarkerOptions;

use super::MarkerFile;

/// Event code for markers.
const MARKER_CODE: &str = "m";

#[derive(Debug, Deserialize)]
struct Header {
    version: u8,
    #[serde(default)]
    duration: Option<f64>,
}

/// A parsed event line: time since the previous event, code, data.
struct EventLine {
    interval: f64,
    code: String,
    data: String,
}

impl EventLine {
    fn from_json(line: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(line).context("Failed to parse event JSON")?;

        let arr = value.as_array().context("Event must be a JSON array")?;

        if arr.len() < 3 {
            bail!("Event array must have at least 3 elements");
        }

        let interval = arr[0].as_f64().context("Event time must be a number")?;
        let code = arr[1].as_str().context("Event type must be a string")?;
        let data = arr[2].as_str().context("Event data must be a string")?;

        Ok(Self {
            interval,
            code: code.to_string(),
            data: data.to_string(),
        })
    }
}

/// Read the markers of an asciicast v3 recording.
///
/// The duration is taken from the header if present, otherwise from the
/// cumulative time of the last event.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<MarkerFile> {
    let mut lines = reader.lines();

    // First line is the header
    let header_line = lines
        .next()
        .context("File is empty")?
        .context("Failed to read header line")?;

    let header: Header = serde_json::from_str(&header_line).context("Failed to parse header")?;

    if header.version != 3 {
        bail!(
            "Only asciicast v3 format is supported (got version {})",
            header.version
        );
    }

    let mut markers = Vec::new();
    let mut cumulative = 0.0f64;

    for (line_num, line_result) in lines.enumerate() {
        let line = line_result.with_context(|| format!("Failed to read line {}", line_num + 2))?;

        if line.trim().is_empty() {
            continue;
        }

        let event = EventLine::from_json(&line)
            .with_context(|| format!("Failed to parse event on line {}", line_num + 2))?;
        cumulative += event.interval;

        if event.code == MARKER_CODE {
            let mut options = MarkerOptions::at(cumulative);
            if !event.data.is_empty() {
                options.text = Some(event.data);
            }
            markers.push(options);
        }
    }

    Ok(MarkerFile {
        duration: header.duration.or(Some(cumulative)),
        markers,
    })
}
