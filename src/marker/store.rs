//! Marker storage with a cached timeline ordering.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use super::error::MarkerError;
use super::id::{IdGenerator, SequentialIds};
use super::types::{Marker, MarkerId, MarkerOptions};

/// Markers keyed by id, plus their time-ordered view.
///
/// The ordered view is built lazily on the first read after a mutation and
/// reused until the next one. Every mutating method drops it before returning,
/// so a cached view always equals the sorted contents of the map.
///
/// Markers with equal times keep id order (stable sort over id-ordered values).
#[derive(Debug)]
pub struct MarkerStore<G = SequentialIds> {
    markers: BTreeMap<MarkerId, Marker>,
    ordered: OnceCell<Vec<Marker>>,
    ids: G,
    revision: u64,
}

impl MarkerStore<SequentialIds> {
    /// Create an empty store with ids counting up from 0.
    pub fn new() -> Self {
        Self::with_ids(SequentialIds::default())
    }
}

impl Default for MarkerStore<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> MarkerStore<G> {
    /// Create an empty store with a specific id generator.
    pub fn with_ids(ids: G) -> Self {
        Self {
            markers: BTreeMap::new(),
            ordered: OnceCell::new(),
            ids,
            revision: 0,
        }
    }

    /// Validate and insert a single marker.
    pub fn add(&mut self, options: MarkerOptions) -> Result<Marker, MarkerError> {
        validate(&options)?;
        let id = self.fresh_id()?;
        Ok(self.insert(id, options))
    }

    /// Insert several markers, returning them in input order.
    ///
    /// Nothing is inserted unless every element is valid.
    pub fn add_all<I>(&mut self, options: I) -> Result<Vec<Marker>, MarkerError>
    where
        I: IntoIterator<Item = MarkerOptions>,
    {
        let options: Vec<MarkerOptions> = options.into_iter().collect();
        for opts in &options {
            validate(opts)?;
        }

        let mut ids = Vec::with_capacity(options.len());
        for _ in 0..options.len() {
            let id = self.fresh_id()?;
            if ids.contains(&id) {
                warn!(%id, "id generator repeated an id within one batch");
                return Err(MarkerError::DuplicateId { id });
            }
            ids.push(id);
        }

        Ok(ids
            .into_iter()
            .zip(options)
            .map(|(id, opts)| self.insert(id, opts))
            .collect())
    }

    /// Delete the given ids. Unknown ids are ignored.
    ///
    /// Returns how many markers were removed.
    pub fn remove<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = MarkerId>,
    {
        let removed = ids
            .into_iter()
            .filter(|id| self.markers.remove(id).is_some())
            .count();

        if removed > 0 {
            self.invalidate();
            debug!(removed, remaining = self.markers.len(), "markers removed");
        }
        removed
    }

    /// Delete every marker.
    pub fn remove_all(&mut self) {
        self.markers.clear();
        self.invalidate();
        debug!("all markers removed");
    }

    fn fresh_id(&mut self) -> Result<MarkerId, MarkerError> {
        let id = self.ids.next_id();
        if self.markers.contains_key(&id) {
            warn!(%id, "id generator returned an id already in use");
            return Err(MarkerError::DuplicateId { id });
        }
        Ok(id)
    }

    fn insert(&mut self, id: MarkerId, options: MarkerOptions) -> Marker {
        let marker = Marker::from_options(id, options);
        self.markers.insert(id, marker.clone());
        self.invalidate();
        debug!(%id, time = marker.time(), "marker added");
        marker
    }
}

impl<G> MarkerStore<G> {
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers sorted ascending by time.
    pub fn ordered_values(&self) -> &[Marker] {
        self.ordered.get_or_init(|| {
            trace!(count = self.markers.len(), "rebuilding marker order");
            let mut ordered: Vec<Marker> = self.markers.values().cloned().collect();
            ordered.sort_by(|a, b| a.time().total_cmp(&b.time()));
            ordered
        })
    }

    /// Counter bumped by every mutation.
    ///
    /// Lets a partition computed against this store notice that it is stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn invalidate(&mut self) {
        self.ordered.take();
        self.revision += 1;
    }
}

fn validate(options: &MarkerOptions) -> Result<(), MarkerError> {
    if !options.time.is_finite() || options.time < 0.0 {
        warn!(time = options.time, "rejecting marker with invalid time");
        return Err(MarkerError::InvalidTime { time: options.time });
    }
    if !options.duration.is_finite() || options.duration < 0.0 {
        warn!(
            duration = options.duration,
            "rejecting marker with invalid duration"
        );
        return Err(MarkerError::InvalidDuration {
            duration: options.duration,
        });
    }
    Ok(())
}
