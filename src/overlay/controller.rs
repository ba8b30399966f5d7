//! The overlay controller tying store, tracker and host together.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::marker::{
    IdGenerator, Marker, MarkerError, MarkerId, MarkerOptions, MarkerStore, SequentialIds,
};
use crate::tracker::{PositionTracker, TrackerConfig};

use super::host::Host;
use super::placement::{place_all, MarkerPlacement};

/// Callback invoked once per reached marker.
///
/// It gets the overlay back so it can navigate or change markers. The
/// crossing it is called for is already committed when it runs. Markers
/// reached while it runs (through `jump_to` or a nested `on_time_update`) are
/// delivered in order after it returns.
pub type ReachedCallback<H, G = SequentialIds> =
    Box<dyn FnMut(&mut MarkerOverlay<H, G>, &Marker)>;

/// Markers overlaid on a host player's timeline.
///
/// Owns the marker store and position tracker of one player. The host's
/// event stream is fed in through the `on_*` methods:
///
/// - `timeupdate` -> [`on_time_update`](MarkerOverlay::on_time_update)
/// - `seeking` -> [`on_seeking`](MarkerOverlay::on_seeking)
/// - `seeked` -> [`on_seeked`](MarkerOverlay::on_seeked)
/// - `durationchange` -> [`on_duration_change`](MarkerOverlay::on_duration_change)
pub struct MarkerOverlay<H, G = SequentialIds> {
    host: H,
    store: MarkerStore<G>,
    tracker: PositionTracker,
    on_reached: Option<ReachedCallback<H, G>>,
    /// Reached markers not yet handed to the callback
    pending: VecDeque<Marker>,
    /// Set while the callback runs
    dispatching: bool,
    /// Target of the last seek issued by the overlay itself
    own_seek: Option<f64>,
    /// Number of seeks the overlay has issued
    seek_count: u64,
}

impl<H: Host> MarkerOverlay<H> {
    /// Create an overlay with sequential marker ids.
    pub fn new(host: H, config: TrackerConfig) -> Self {
        Self::with_ids(host, config, SequentialIds::default())
    }
}

impl<H: Host, G: IdGenerator> MarkerOverlay<H, G> {
    /// Create an overlay with a specific id generator.
    pub fn with_ids(host: H, config: TrackerConfig, ids: G) -> Self {
        Self {
            host,
            store: MarkerStore::with_ids(ids),
            tracker: PositionTracker::new(config),
            on_reached: None,
            pending: VecDeque::new(),
            dispatching: false,
            own_seek: None,
            seek_count: 0,
        }
    }

    /// Register the callback fired when playback reaches a marker.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut MarkerOverlay<H, G>, &Marker) + 'static,
    {
        self.set_callback(callback);
        self
    }

    /// Replace the reached callback.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&mut MarkerOverlay<H, G>, &Marker) + 'static,
    {
        self.on_reached = Some(Box::new(callback));
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn store(&self) -> &MarkerStore<G> {
        &self.store
    }

    /// Add a marker and repartition.
    ///
    /// Markers already passed or navigated stay where they are; the new one
    /// counts as passed only if it lies behind the playback position.
    pub fn add(&mut self, options: MarkerOptions) -> Result<Marker, MarkerError> {
        let marker = self.store.add(options)?;
        self.repartition();
        Ok(marker)
    }

    /// Add several markers; nothing is added if any of them is invalid.
    pub fn add_all<I>(&mut self, options: I) -> Result<Vec<Marker>, MarkerError>
    where
        I: IntoIterator<Item = MarkerOptions>,
    {
        let markers = self.store.add_all(options)?;
        self.repartition();
        Ok(markers)
    }

    /// Remove markers by id. Unknown ids are ignored.
    pub fn remove<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = MarkerId>,
    {
        let removed = self.store.remove(ids);
        if removed > 0 {
            self.repartition();
        }
        removed
    }

    /// Remove every marker.
    pub fn remove_all(&mut self) {
        self.store.remove_all();
        self.tracker.reset();
        self.pending.clear();
        self.own_seek = None;
    }

    /// Markers in timeline order.
    pub fn markers(&self) -> &[Marker] {
        self.tracker.ordered_markers(&self.store)
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.store.get(id)
    }

    /// Seek the host to the next marker ahead.
    ///
    /// Returns the marker, or `None` (host untouched) if none remain.
    pub fn next(&mut self) -> Option<Marker> {
        let marker = self.tracker.next(&self.store)?;
        self.seek_to(marker.time());
        Some(marker)
    }

    /// Seek the host back to the last passed marker.
    ///
    /// Returns the marker, or `None` (host untouched) if none were passed.
    pub fn prev(&mut self) -> Option<Marker> {
        let marker = self.tracker.prev(&self.store)?;
        self.seek_to(marker.time());
        Some(marker)
    }

    /// Seek the host to a specific marker and report it as reached.
    ///
    /// This is what a click on a marker does.
    pub fn jump_to(&mut self, id: MarkerId) -> Option<Marker> {
        let marker = self.store.get(id)?.clone();
        self.seek_to(marker.time());
        self.tracker.resync(&self.store, marker.time());
        self.fire(marker.clone());
        Some(marker)
    }

    /// Periodic playback tick: report every marker the host has moved past.
    ///
    /// Stops early if the reached callback seeks the host, so nothing behind
    /// the new position is reported in the same tick. Returns how many
    /// markers were reached.
    pub fn on_time_update(&mut self) -> usize {
        if let Some(target) = self.own_seek {
            if !self.host_is_at(target) {
                trace!(seek_target = target, "overlay seek finished without seek events");
                self.own_seek = None;
            }
        }

        let mut reached = 0;
        loop {
            let position = self.host.current_time();
            let Some(marker) = self.tracker.advance(&self.store, position) else {
                break;
            };
            reached += 1;

            let seeks = self.seek_count;
            self.fire(marker);
            if self.seek_count != seeks {
                debug!("reached callback moved playback, ending tick");
                break;
            }
        }
        reached
    }

    /// The host started a seek. Reached events are suspended until it lands.
    pub fn on_seeking(&mut self) {
        if let Some(target) = self.own_seek {
            if self.host_is_at(target) {
                trace!("seek issued by overlay, keeping partition");
                return;
            }
            self.own_seek = None;
        }
        self.tracker.reset();
    }

    /// The host finished a seek.
    pub fn on_seeked(&mut self) {
        let position = self.host.current_time();
        let landed_on_own_seek = self
            .own_seek
            .take()
            .is_some_and(|target| self.host_is_at(target));

        if landed_on_own_seek && self.tracker.is_initialized() {
            trace!(position, "landed on overlay seek target");
        } else {
            self.tracker.resync(&self.store, position);
        }
    }

    /// The media duration changed. Returns the new marker placements.
    ///
    /// The partition is kept while the host is still where the tracker last
    /// saw it, otherwise it is rebuilt at the host's position.
    pub fn on_duration_change(&mut self) -> Vec<MarkerPlacement> {
        debug!(duration = ?self.host.duration(), "duration changed");
        let in_place = self.tracker.position().is_some_and(|p| self.host_is_at(p));
        if !(in_place && self.tracker.refresh(&self.store)) {
            self.resync();
        }
        self.placements()
    }

    /// Placement of every marker on the host's progress bar, in timeline order.
    pub fn placements(&self) -> Vec<MarkerPlacement> {
        place_all(self.markers(), self.host.duration())
    }

    /// Detach from the host, dropping all markers.
    pub fn dispose(mut self) -> H {
        self.remove_all();
        self.on_reached = None;
        self.pending.clear();
        debug!("marker overlay disposed");
        self.host
    }

    fn resync(&mut self) {
        let position = self.host.current_time();
        self.tracker.resync(&self.store, position);
    }

    /// Carry the partition over to the changed store, or start one at the
    /// host's position if there is none.
    fn repartition(&mut self) {
        if !self.tracker.refresh(&self.store) {
            self.resync();
        }
    }

    fn host_is_at(&self, time: f64) -> bool {
        (self.host.current_time() - time).abs() < self.tracker.config().epsilon
    }

    fn seek_to(&mut self, time: f64) {
        self.own_seek = Some(time);
        self.seek_count += 1;
        self.host.seek(time);
    }

    fn fire(&mut self, marker: Marker) {
        self.pending.push_back(marker);
        if self.dispatching {
            return;
        }

        self.dispatching = true;
        while let Some(marker) = self.pending.pop_front() {
            if let Some(mut callback) = self.on_reached.take() {
                callback(self, &marker);
                // Keep a callback installed from inside the call
                if self.on_reached.is_none() {
                    self.on_reached = Some(callback);
                }
            }
        }
        self.dispatching = false;
    }
}
