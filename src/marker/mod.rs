//! Markers and their ordered store.
//!
//! A marker is a timestamp on the media timeline with optional span length,
//! label and classifier. The [`MarkerStore`] owns all markers of one overlay
//! and hands out a time-ordered, read-only view of them.

mod error;
mod id;
mod store;
mod types;

pub use error::MarkerError;
pub use id::{IdGenerator, SequentialIds};
pub use store::MarkerStore;
pub use types::{Marker, MarkerId, MarkerOptions};
