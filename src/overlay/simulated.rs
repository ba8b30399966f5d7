//! In-memory host player and a scripted playthrough driver.
//!
//! Used by the `replay` command and by tests: the player has no media, it
//! only keeps a position that is moved by playback ticks and seeks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::marker::{Marker, MarkerError, MarkerOptions};
use crate::tracker::TrackerConfig;

use super::controller::MarkerOverlay;
use super::host::Host;

/// Smallest tick accepted by [`Playthrough`] (seconds).
pub const MIN_TICK: f64 = 0.001;

/// A host player without media.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatedPlayer {
    time: f64,
    duration: Option<f64>,
    seeks: Vec<f64>,
}

impl SimulatedPlayer {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            time: 0.0,
            duration,
            seeks: Vec::new(),
        }
    }

    /// Continuous playback up to `time` (no seek is recorded).
    pub fn play_to(&mut self, time: f64) {
        self.time = self.clamp(time);
    }

    pub fn set_duration(&mut self, duration: Option<f64>) {
        self.duration = duration;
    }

    /// Every seek target so far, in order.
    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }

    fn clamp(&self, time: f64) -> f64 {
        let time = time.max(0.0);
        match self.duration {
            Some(duration) => time.min(duration),
            None => time,
        }
    }
}

impl Host for SimulatedPlayer {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn seek(&mut self, time: f64) {
        self.time = self.clamp(time);
        self.seeks.push(self.time);
    }
}

/// A user seek scripted into a playthrough: when playback passes `at`,
/// jump to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekPlan {
    pub at: f64,
    pub to: f64,
}

impl FromStr for SeekPlan {
    type Err = String;

    /// Parses `AT=TO`, both in seconds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, to) = s
            .split_once('=')
            .ok_or_else(|| format!("expected AT=TO, got '{}'", s))?;
        let parse = |value: &str| -> Result<f64, String> {
            let seconds: f64 = value
                .trim()
                .parse()
                .map_err(|_| format!("invalid time '{}'", value.trim()))?;
            if seconds.is_finite() && seconds >= 0.0 {
                Ok(seconds)
            } else {
                Err(format!("time must be finite and >= 0, got '{}'", value.trim()))
            }
        };
        Ok(Self {
            at: parse(at)?,
            to: parse(to)?,
        })
    }
}

impl fmt::Display for SeekPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.at, self.to)
    }
}

/// Something that happened during a playthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// Playback position moved past a marker
    Reached { position: f64, marker: Marker },
    /// A scripted seek was applied
    Seeked { from: f64, to: f64 },
}

/// Plays a simulated player from 0 to `duration` in fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Playthrough {
    pub duration: f64,
    pub tick: f64,
    pub seeks: Vec<SeekPlan>,
}

impl Playthrough {
    /// Creates a playthrough, raising `tick` to at least [`MIN_TICK`].
    pub fn new(duration: f64, tick: f64) -> Self {
        let tick = if tick.is_finite() { tick.max(MIN_TICK) } else { MIN_TICK };
        Self {
            duration,
            tick,
            seeks: Vec::new(),
        }
    }

    pub fn with_seeks(mut self, seeks: impl IntoIterator<Item = SeekPlan>) -> Self {
        self.seeks.extend(seeks);
        self
    }

    /// Run the playthrough over the given markers.
    ///
    /// Each scripted seek is applied once, after the first tick that reaches
    /// its `at` time has been reported.
    pub fn run(
        &self,
        markers: Vec<MarkerOptions>,
        config: TrackerConfig,
    ) -> Result<Vec<ReplayEvent>, MarkerError> {
        let events: Rc<RefCell<Vec<ReplayEvent>>> = Rc::default();
        let sink = Rc::clone(&events);

        let mut overlay = MarkerOverlay::new(SimulatedPlayer::new(Some(self.duration)), config)
            .with_callback(move |overlay, marker| {
                sink.borrow_mut().push(ReplayEvent::Reached {
                    position: overlay.host().current_time(),
                    marker: marker.clone(),
                });
            });
        overlay.add_all(markers)?;

        let mut pending = self.seeks.clone();
        let mut position = 0.0;
        while position < self.duration {
            position = (position + self.tick).min(self.duration);
            overlay.host_mut().play_to(position);
            overlay.on_time_update();

            if let Some(index) = pending.iter().position(|s| s.at <= position) {
                let plan = pending.remove(index);
                overlay.host_mut().seek(plan.to);
                overlay.on_seeking();
                overlay.on_seeked();
                events.borrow_mut().push(ReplayEvent::Seeked {
                    from: position,
                    to: overlay.host().current_time(),
                });
                position = overlay.host().current_time();
            }
        }

        drop(overlay);
        let events = events.take();
        Ok(events)
    }
}
