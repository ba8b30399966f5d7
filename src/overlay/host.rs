//! Host trait: the player the overlay is attached to.

/// The media player an overlay is attached to.
///
/// The overlay never plays anything itself. It reads the playback position
/// and duration from the host and asks the host to seek when the caller
/// navigates between markers.
pub trait Host {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total media duration in seconds, `None` while unknown.
    fn duration(&self) -> Option<f64>;

    /// Move the playback position to `time`.
    ///
    /// The host is expected to report the seek back through
    /// `on_seeking`/`on_seeked` if it emits such events.
    fn seek(&mut self, time: f64);
}

impl<H: Host + ?Sized> Host for &mut H {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn seek(&mut self, time: f64) {
        (**self).seek(time)
    }
}

impl<H: Host + ?Sized> Host for Box<H> {
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }

    fn seek(&mut self, time: f64) {
        (**self).seek(time)
    }
}
