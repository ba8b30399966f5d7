//! Playback position tracking.
//!
//! Splits the ordered markers into the ones the playback position has
//! already passed and the ones still ahead, and moves that split as playback
//! advances or the user navigates between markers.
//!
//! # Module Structure
//!
//! - [`config`] - Time-equality tolerance
//! - [`search`] - Binary search for the split point
//! - [`position`] - The stateful tracker

mod config;
mod position;
mod search;

pub use config::{TrackerConfig, DEFAULT_EPSILON};
pub use position::PositionTracker;
pub use search::{split_before, split_index};
