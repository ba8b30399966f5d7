//! Marker placement relative to the media duration.
//!
//! The host draws markers on its progress bar; this module only works out
//! where, as fractions of the bar width.

use serde::Serialize;

use crate::marker::{Marker, MarkerId};

/// Where a marker sits on the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerPlacement {
    pub id: MarkerId,
    /// Offset from the start of the bar, as a fraction of its width
    pub left: f64,
    /// Width of the marked span as a fraction of the bar, `None` for point markers
    pub width: Option<f64>,
    /// False when the marker lies outside the media or the duration is unknown
    pub visible: bool,
}

/// Place a single marker on a timeline of `total` seconds.
///
/// Markers past the end are kept but hidden; they come back into view if
/// the duration grows.
pub fn place(marker: &Marker, total: Option<f64>) -> MarkerPlacement {
    let total = total.filter(|t| t.is_finite() && *t > 0.0);

    match total {
        Some(total) => {
            let left = marker.time() / total;
            let width = (marker.duration() > 0.0).then(|| marker.duration() / total);
            MarkerPlacement {
                id: marker.id(),
                left,
                width,
                visible: (0.0..=1.0).contains(&left),
            }
        }
        None => MarkerPlacement {
            id: marker.id(),
            left: 0.0,
            width: None,
            visible: false,
        },
    }
}

/// Place every marker, keeping input order.
pub fn place_all(markers: &[Marker], total: Option<f64>) -> Vec<MarkerPlacement> {
    markers.iter().map(|m| place(m, total)).collect()
}
