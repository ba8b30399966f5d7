//! Marker overlay for a host media player.
//!
//! Provides the caller-facing marker API on top of the store and tracker:
//!
//! - `controller`: [`MarkerOverlay`], add/remove/navigate markers and feed host events
//! - `host`: the [`Host`] trait a player implements to carry an overlay
//! - `placement`: where markers sit on the progress bar for a given duration
//! - `simulated`: an in-memory player and a scripted playthrough driver
//!
//! # Usage
//!
//! ```
//! use markers::marker::MarkerOptions;
//! use markers::overlay::{Host, MarkerOverlay, SimulatedPlayer};
//! use markers::tracker::TrackerConfig;
//!
//! let mut overlay = MarkerOverlay::new(SimulatedPlayer::new(Some(60.0)), TrackerConfig::default())
//!     .with_callback(|_, marker| println!("reached {}", marker.time()));
//! overlay.add_all([10.0, 30.0].map(MarkerOptions::at)).unwrap();
//!
//! overlay.host_mut().play_to(12.0);
//! assert_eq!(overlay.on_time_update(), 1);
//!
//! let next = overlay.next().unwrap();
//! assert_eq!(overlay.host().current_time(), next.time());
//! ```

mod controller;
mod host;
mod placement;
mod simulated;

pub use controller::{MarkerOverlay, ReachedCallback};
pub use host::Host;
pub use placement::{place, place_all, MarkerPlacement};
pub use simulated::{Playthrough, ReplayEvent, SeekPlan, SimulatedPlayer, MIN_TICK};
