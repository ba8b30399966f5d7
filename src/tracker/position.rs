//! Playback position tracking over the ordered marker sequence.

use tracing::{debug, trace, warn};

use crate::marker::{Marker, MarkerId, MarkerStore};

use super::config::TrackerConfig;
use super::search::{split_before, split_index};

/// Split point of the ordered markers, and what it was computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Partition {
    /// Markers `[0, split)` are visited, `[split, len)` remain
    split: usize,
    /// Store revision the split is valid for
    revision: u64,
    /// Furthest position seen since the last resync or navigation
    position: f64,
    /// Sort key of the first remaining marker, `None` when all are visited
    bound: Option<(f64, MarkerId)>,
}

impl Partition {
    fn compute<G>(store: &MarkerStore<G>, position: f64, config: &TrackerConfig) -> Self {
        let split = split_index(store.ordered_values(), position, config);
        Self::at(store, split, position)
    }

    fn at<G>(store: &MarkerStore<G>, split: usize, position: f64) -> Self {
        Self {
            split,
            revision: store.revision(),
            position,
            bound: store
                .ordered_values()
                .get(split)
                .map(|m| (m.time(), m.id())),
        }
    }

    /// The same partition over the store's current markers.
    ///
    /// Surviving markers stay on their side. A new marker is visited only if
    /// it is reached at `position` and sorts before the old first remaining
    /// marker.
    fn carried_over<G>(&self, store: &MarkerStore<G>, config: &TrackerConfig) -> Self {
        let split = split_before(store.ordered_values(), self.position, self.bound, config);
        Self::at(store, split, self.position)
    }
}

/// Tracks which markers the playback position has passed.
///
/// The tracker holds a single index into the store's ordered view: markers
/// before it are visited, markers from it onwards remain. It starts out
/// uninitialized and only produces events or navigates after [`resync`].
///
/// Forward continuous playback goes through [`advance`], which only ever looks
/// at the first remaining marker. Seeks need a [`resync`]. After the store is
/// mutated the partition is carried over by [`refresh`] (or lazily on next
/// use), so surviving markers keep their side even right after [`prev`].
///
/// [`resync`]: PositionTracker::resync
/// [`advance`]: PositionTracker::advance
/// [`refresh`]: PositionTracker::refresh
/// [`prev`]: PositionTracker::prev
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    config: TrackerConfig,
    partition: Option<Partition>,
}

impl PositionTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            partition: None,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Whether a partition has been computed since creation or the last reset.
    pub fn is_initialized(&self) -> bool {
        self.partition.is_some()
    }

    /// Whether the partition is current for this store.
    pub fn is_synced<G>(&self, store: &MarkerStore<G>) -> bool {
        matches!(self.partition, Some(p) if p.revision == store.revision())
    }

    /// Last playback position seen, if initialized.
    pub fn position(&self) -> Option<f64> {
        self.partition.map(|p| p.position)
    }

    /// Recompute the partition from scratch at `position`.
    ///
    /// Returns the number of visited markers.
    pub fn resync<G>(&mut self, store: &MarkerStore<G>, position: f64) -> usize {
        let partition = Partition::compute(store, position, &self.config);
        debug!(
            position,
            visited = partition.split,
            total = store.len(),
            "marker partition resynced"
        );
        self.partition = Some(partition);
        partition.split
    }

    /// Carry the partition over to the store's current markers.
    ///
    /// Returns `false` if there is no partition to carry over.
    pub fn refresh<G>(&mut self, store: &MarkerStore<G>) -> bool {
        let config = self.config;
        let Some(partition) = self.partition.as_mut() else {
            return false;
        };
        if partition.revision != store.revision() {
            *partition = partition.carried_over(store, &config);
            debug!(
                position = partition.position,
                visited = partition.split,
                total = store.len(),
                "marker partition carried over"
            );
        }
        true
    }

    /// Drop the partition. Nothing is reached or navigated until the next
    /// [`resync`](PositionTracker::resync).
    pub fn reset(&mut self) {
        if self.partition.take().is_some() {
            debug!("marker partition reset");
        }
    }

    /// Move past at most one marker for forward playback to `position`.
    ///
    /// Returns the crossed marker, already moved to the visited side. Call
    /// repeatedly until it returns `None` to drain every crossing; see
    /// [`advance_all`](PositionTracker::advance_all).
    pub fn advance<G>(&mut self, store: &MarkerStore<G>, position: f64) -> Option<Marker> {
        let config = self.config;
        let partition = self.current(store)?;
        partition.position = partition.position.max(position);

        let next = store.ordered_values().get(partition.split)?;
        if !config.is_reached(next.time(), position) {
            trace!(position, next = next.time(), "no marker reached");
            return None;
        }

        *partition = Partition::at(store, partition.split + 1, partition.position);
        debug!(id = %next.id(), time = next.time(), position, "marker reached");
        Some(next.clone())
    }

    /// Every marker crossed by forward playback to `position`, in timeline order.
    pub fn advance_all<G>(&mut self, store: &MarkerStore<G>, position: f64) -> Vec<Marker> {
        std::iter::from_fn(|| self.advance(store, position)).collect()
    }

    /// Take the earliest remaining marker and mark it visited.
    pub fn next<G>(&mut self, store: &MarkerStore<G>) -> Option<Marker> {
        let partition = self.current(store)?;
        let marker = store.ordered_values().get(partition.split)?.clone();

        *partition = Partition::at(store, partition.split + 1, marker.time());
        debug!(id = %marker.id(), time = marker.time(), "navigated to next marker");
        Some(marker)
    }

    /// Take the latest visited marker and move it back to the remaining side.
    pub fn prev<G>(&mut self, store: &MarkerStore<G>) -> Option<Marker> {
        let partition = self.current(store)?;
        let index = partition.split.checked_sub(1)?;
        let marker = store.ordered_values().get(index)?.clone();

        *partition = Partition::at(store, index, marker.time());
        debug!(id = %marker.id(), time = marker.time(), "navigated to previous marker");
        Some(marker)
    }

    /// The store's ordered markers.
    pub fn ordered_markers<'s, G>(&self, store: &'s MarkerStore<G>) -> &'s [Marker] {
        store.ordered_values()
    }

    /// Markers already passed, ascending by time.
    pub fn visited<'s, G>(&self, store: &'s MarkerStore<G>) -> &'s [Marker] {
        let ordered = store.ordered_values();
        &ordered[..self.split_for(store)]
    }

    /// Markers not yet passed, ascending by time.
    pub fn remaining<'s, G>(&self, store: &'s MarkerStore<G>) -> &'s [Marker] {
        let ordered = store.ordered_values();
        &ordered[self.split_for(store)..]
    }

    fn split_for<G>(&self, store: &MarkerStore<G>) -> usize {
        match self.partition {
            None => 0,
            Some(p) if p.revision == store.revision() => p.split,
            Some(p) => p.carried_over(store, &self.config).split,
        }
    }

    /// The partition, recomputed first if the store changed underneath it.
    fn current<G>(&mut self, store: &MarkerStore<G>) -> Option<&mut Partition> {
        let partition = self.partition.as_mut()?;
        if partition.revision != store.revision() {
            warn!(
                position = partition.position,
                "marker set changed without refresh, carrying partition over"
            );
            *partition = partition.carried_over(store, &self.config);
        }
        Some(partition)
    }
}
