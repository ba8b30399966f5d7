//! Timeline markers for media players.
//!
//! Keeps a set of markers (timestamps with optional span, label and class)
//! ordered along a media timeline, tracks which of them the playback position
//! has passed, reports each crossing once, and navigates between markers.
//!
//! - [`marker`]: marker values and the ordered [`MarkerStore`]
//! - [`tracker`]: the [`PositionTracker`] splitting markers into visited and remaining
//! - [`overlay`]: [`MarkerOverlay`], the API a host player drives
//! - [`source`]: loading markers from JSON, TOML and asciicast files
//! - [`config`]: user configuration

pub mod cli;
pub mod config;
pub mod marker;
pub mod overlay;
pub mod source;
pub mod tracker;

pub use config::Config;
pub use marker::{Marker, MarkerError, MarkerId, MarkerOptions, MarkerStore};
pub use overlay::{Host, MarkerOverlay};
pub use tracker::{PositionTracker, TrackerConfig};
