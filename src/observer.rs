//! Optional diagnostics hooks.
//!
//! Tables default to the `()` observer whose hooks are empty and inline
//! away. [`Counters`] tallies every event.

use std::cell::Cell;

/// Receives probe, shift and growth events from a table
///
/// Hooks take `&self` because lookups only borrow the table.
pub trait ProbeObserver {
    /// An insert skipped an occupied slot holding a different key
    #[inline]
    fn on_collision(&self) {}

    /// A lookup or delete advanced past a non-matching slot
    #[inline]
    fn on_probe(&self) {}

    /// Deletion repair moved an entry from `from` back to `to`
    #[inline]
    fn on_shift(&self, _from: usize, _to: usize) {}

    /// The slot array was rebuilt at a larger capacity
    #[inline]
    fn on_grow(&self, _old_capacity: usize, _new_capacity: usize) {}
}

impl ProbeObserver for () {}

/// Event counters
#[derive(Debug, Default)]
pub struct Counters {
    collisions: Cell<u64>,
    probes: Cell<u64>,
    shifts: Cell<u64>,
    grows: Cell<u64>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collisions(&self) -> u64 {
        self.collisions.get()
    }

    pub fn probes(&self) -> u64 {
        self.probes.get()
    }

    pub fn shifts(&self) -> u64 {
        self.shifts.get()
    }

    pub fn grows(&self) -> u64 {
        self.grows.get()
    }

    #[inline]
    fn bump(cell: &Cell<u64>) {
        cell.set(cell.get().wrapping_add(1));
    }
}

impl ProbeObserver for Counters {
    #[inline]
    fn on_collision(&self) {
        Self::bump(&self.collisions);
    }

    #[inline]
    fn on_probe(&self) {
        Self::bump(&self.probes);
    }

    #[inline]
    fn on_shift(&self, _from: usize, _to: usize) {
        Self::bump(&self.shifts);
    }

    #[inline]
    fn on_grow(&self, _old_capacity: usize, _new_capacity: usize) {
        Self::bump(&self.grows);
    }
}
