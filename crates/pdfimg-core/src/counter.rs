//! Running PDF object number.

/// Hands out indirect object numbers in strictly increasing order.
///
/// The document writer owns one counter and lends it out by `&mut` to every
/// component that writes objects, so numbers are assigned in the same order the
/// objects land in the output. A counter is never rewound and is
/// not `Clone`.
#[derive(Debug, Default)]
pub struct ObjectCounter {
    current: u64,
}

impl ObjectCounter {
    /// Start after `current`; the first allocated number is `current + 1`.
    pub fn new(current: u64) -> Self {
        Self { current }
    }

    /// Allocate the next object number.
    pub fn allocate(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// The most recently allocated number (or the starting value).
    pub fn current(&self) -> u64 {
        self.current
    }
}
