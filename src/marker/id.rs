//! Id generation for stored markers.

use super::types::MarkerId;

/// Source of fresh marker ids.
///
/// The store asks for one id per inserted marker. Implementations must not
/// hand out the same id twice; the store rejects duplicates.
pub trait IdGenerator {
    fn next_id(&mut self) -> MarkerId;
}

/// Counter starting at 0, one per store instance.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at `first` (for tests).
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> MarkerId {
        let id = MarkerId::new(self.next);
        self.next += 1;
        id
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> MarkerId,
{
    fn next_id(&mut self) -> MarkerId {
        self()
    }
}
