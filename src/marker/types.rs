//! Marker value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a stored marker.
///
/// Assigned by the store on insertion and never reused by the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(u64);

impl MarkerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a caller supplies to create a marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    /// Position on the timeline in seconds
    pub time: f64,
    /// Length of the marked span in seconds (0 for a point marker)
    #[serde(default)]
    pub duration: f64,
    /// Label shown by the host (tooltip text, chapter title, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Extra classifier the host can style or filter on
    #[serde(
        default,
        rename = "class",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_name: Option<String>,
}

impl MarkerOptions {
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// A marker as held by the store.
///
/// Fields are private so a stored marker cannot change behind the store's
/// back; the cached ordering depends on `time` staying put.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    id: MarkerId,
    time: f64,
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
}

impl Marker {
    pub(crate) fn from_options(id: MarkerId, options: MarkerOptions) -> Self {
        Self {
            id,
            time: options.time,
            duration: options.duration,
            text: options.text,
            class_name: options.class_name,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Time at which the marked span ends.
    pub fn end_time(&self) -> f64 {
        self.time + self.duration
    }
}
