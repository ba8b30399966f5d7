//! Partition point search over the ordered marker sequence.

use crate::marker::{Marker, MarkerId};

use super::config::TrackerConfig;

/// Number of markers already reached at `position`.
///
/// `markers` must be sorted ascending by time. Every marker before the
/// returned index satisfies [`TrackerConfig::is_reached`], every marker from
/// it onwards does not. Markers sharing a time always land on the same side.
/// O(log n).
pub fn split_index(markers: &[Marker], position: f64, config: &TrackerConfig) -> usize {
    split_before(markers, position, None, config)
}

/// Like [`split_index`], but never past the marker whose sort key is `bound`.
///
/// `bound` is the `(time, id)` key of a marker known to be unvisited, in the
/// order of [`MarkerStore::ordered_values`](crate::marker::MarkerStore::ordered_values).
/// The marker itself need not be in `markers` any more. Both conditions hold
/// for a prefix of the sequence, so their conjunction is still a single
/// partition point.
pub fn split_before(
    markers: &[Marker],
    position: f64,
    bound: Option<(f64, MarkerId)>,
    config: &TrackerConfig,
) -> usize {
    markers.partition_point(|marker| {
        config.is_reached(marker.time(), position)
            && bound.map_or(true, |b| sorts_before(marker, b))
    })
}

fn sorts_before(marker: &Marker, (time, id): (f64, MarkerId)) -> bool {
    marker
        .time()
        .total_cmp(&time)
        .then(marker.id().cmp(&id))
        .is_lt()
}
