//! Marker validation errors.

use super::types::MarkerId;

/// Errors that can occur when inserting markers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkerError {
    #[error("Invalid marker time {time}: must be finite and >= 0")]
    InvalidTime { time: f64 },

    #[error("Invalid marker duration {duration}: must be finite and >= 0")]
    InvalidDuration { duration: f64 },

    #[error("Id generator produced id {id} which is already in use")]
    DuplicateId { id: MarkerId },
}
