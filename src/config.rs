//! Table construction parameters

/// Default number of slots in a new table (2^24)
pub const INITIAL_CAPACITY: usize = 16 * 1024 * 1024;

/// Construction-time settings for a [`ShiftTable`](crate::ShiftTable)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableConfig {
    initial_capacity: usize,
}

impl TableConfig {
    pub fn new() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
        }
    }

    /// Set the starting slot count
    ///
    /// Rounded up to a power of two; zero becomes one. Values past the
    /// largest power of two saturate there, and the allocation fails instead.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .unwrap_or(1 << (usize::BITS - 1));
        self
    }

    /// The effective starting slot count
    #[inline]
    pub fn capacity(&self) -> usize {
        self.initial_capacity
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}
