use super::direction::Direction;

/// Single-buffered steering input.
///
/// Requests between two ticks collapse to the last one that is not a reversal
/// of the heading committed on the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputArbiter {
    committed: Direction,
    pending: Direction,
}

impl InputArbiter {
    pub fn new(heading: Direction) -> Self {
        Self {
            committed: heading,
            pending: heading,
        }
    }

    /// Buffer `heading` for the next tick. Returns false if it was rejected
    /// as a reversal of the committed heading.
    pub fn request(&mut self, heading: Direction) -> bool {
        if self.committed.is_opposite(heading) {
            return false;
        }
        self.pending = heading;
        true
    }

    /// Called once per tick, before movement
    pub fn commit(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    pub fn reset(&mut self, heading: Direction) {
        *self = Self::new(heading);
    }

    pub fn committed(&self) -> Direction {
        self.committed
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }
}
