//! Linear probe sequence over a power-of-two slot array.
//!
//! - Home slot is `hash mod capacity`, computed with a mask
//! - Sequence visits `home, home + 1, ...` wrapping at `capacity`
//! - Every index is visited at most once, so probing always terminates

/// Compute the home slot of a hash
#[inline]
pub fn home_slot(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (hash & (capacity as u64 - 1)) as usize
}

/// Number of steps a linear probe takes from `home` to reach `index`
#[inline]
pub fn probe_distance(home: usize, index: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    index.wrapping_sub(home) & (capacity - 1)
}

/// Cyclic iterator over slot indices, starting at a home slot
///
/// Yields exactly `capacity` indices before ending. The load bound keeps at
/// least one slot empty, so lookups and inserts stop well before that.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    pos: usize,
    mask: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// Start probing from the home slot of `hash`
    #[inline]
    pub fn new(hash: u64, capacity: usize) -> Self {
        Self::from_index(home_slot(hash, capacity), capacity)
    }

    /// Start probing from an explicit index
    #[inline]
    pub fn from_index(start: usize, capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(start < capacity);
        Self {
            pos: start,
            mask: capacity - 1,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.pos;
        self.pos = (self.pos + 1) & self.mask;
        self.remaining -= 1;
        Some(idx)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
