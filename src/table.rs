use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::TableConfig;
use crate::error::Error;
use crate::iter::{Item, Iter};
use crate::observer::ProbeObserver;
use crate::probe::{home_slot, probe_distance, ProbeSeq};
use crate::slot::{Slot, SlotArray};
use crate::strategy::{KeyEq, KeyHasher};

/// Occupancy at which the next insert grows the table first: `floor(capacity * 0.75)`
#[inline]
pub(crate) fn grow_threshold(capacity: usize) -> usize {
    capacity / 4 * 3 + capacity % 4 * 3 / 4
}

/// Outcome of probing for a key on insert
enum Probe {
    /// Slot already holds an equal key
    Occupied(usize),
    /// First empty slot on the key's probe path
    Vacant(usize),
    /// Every slot was visited without finding either
    Exhausted,
}

/// An open-addressing hash table over byte-string keys and values
///
/// `ShiftTable` uses linear probing from `hash mod capacity`, doubles its
/// capacity once three quarters of the slots are taken, and repairs probe
/// chains on deletion by shifting displaced entries back instead of leaving
/// tombstones.
///
/// Hashing and key equality are supplied by the caller as a [`KeyHasher`]
/// and a [`KeyEq`]. The optional observer `O` receives diagnostic events.
pub struct ShiftTable<H, C, O = ()> {
    slots: SlotArray,
    len: usize,
    hasher: H,
    comparator: C,
    observer: O,
}

impl<H, C> ShiftTable<H, C, ()> {
    /// Create an empty table with the default initial capacity
    #[inline]
    pub fn new(hasher: H, comparator: C) -> Result<Self, Error> {
        Self::with_config(hasher, comparator, TableConfig::default())
    }

    /// Create an empty table with the given config
    #[inline]
    pub fn with_config(hasher: H, comparator: C, config: TableConfig) -> Result<Self, Error> {
        Self::with_observer(hasher, comparator, config, ())
    }
}

impl<H, C, O> ShiftTable<H, C, O> {
    /// Create an empty table reporting to `observer`
    pub fn with_observer(
        hasher: H,
        comparator: C,
        config: TableConfig,
        observer: O,
    ) -> Result<Self, Error> {
        let slots = SlotArray::try_new(config.capacity()).inspect_err(|_| {
            warn!(capacity = config.capacity(), "failed to allocate slot array");
        })?;

        Ok(Self {
            slots,
            len: 0,
            hasher,
            comparator,
            observer,
        })
    }

    /// Returns the number of entries in the table
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots; always a power of two
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns a reference to the hash strategy
    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns a reference to the key comparator
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns a reference to the observer
    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Returns the entry stored at slot `index`, if any
    #[inline]
    pub fn slot(&self, index: usize) -> Option<Item<'_>> {
        self.slots.get(index).map(Item::from)
    }

    /// Iterate over all entries in slot order
    ///
    /// Yields `(slot_index, item)`. The order is unrelated to insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(
            self.slots
                .iter_occupied()
                .map(|(idx, slot)| (idx, Item::from(slot))),
        )
    }

    /// Release the table and every buffer it owns
    #[inline]
    pub fn close(self) {}
}

impl<H, C, O> ShiftTable<H, C, O>
where
    H: KeyHasher,
    C: KeyEq,
    O: ProbeObserver,
{
    /// Find the slot holding `key`
    fn find(&self, key: &[u8]) -> Option<usize> {
        let hash = self.hasher.hash(key);
        for idx in ProbeSeq::new(hash, self.capacity()) {
            let slot = self.slots.get(idx)?;
            if self.comparator.key_eq(slot.key(), key) {
                return Some(idx);
            }
            self.observer.on_probe();
        }
        None
    }

    /// Find where `key` lives or where it would go
    fn probe_insert(&self, key: &[u8]) -> Probe {
        let hash = self.hasher.hash(key);
        for idx in ProbeSeq::new(hash, self.capacity()) {
            match self.slots.get(idx) {
                None => return Probe::Vacant(idx),
                Some(slot) if self.comparator.key_eq(slot.key(), key) => {
                    return Probe::Occupied(idx)
                }
                Some(_) => self.observer.on_collision(),
            }
        }
        Probe::Exhausted
    }

    /// Returns the entry for `key`
    ///
    /// The returned item borrows the table, so it cannot outlive the next
    /// `put`, `delete` or `grow`.
    #[inline]
    pub fn get(&self, key: &[u8]) -> Option<Item<'_>> {
        self.find(key).and_then(|idx| self.slot(idx))
    }

    /// Return `true` if the table contains `key`
    #[inline]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Insert or overwrite the value for `key`
    ///
    /// Returns the index of the slot now holding the entry. When the table is
    /// at its load threshold it grows first; a failed growth aborts the
    /// insert and leaves the table untouched.
    ///
    /// If the new value cannot be allocated while overwriting, the previous
    /// value stays in place and the error is returned.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<usize, Error> {
        if self.len >= grow_threshold(self.capacity()) {
            self.grow()?;
        }

        loop {
            match self.probe_insert(key) {
                Probe::Occupied(idx) => {
                    if let Some(slot) = self.slots[idx].as_mut() {
                        slot.try_replace_value(value).inspect_err(|_| {
                            warn!(len = value.len(), "failed to allocate value buffer");
                        })?;
                    }
                    return Ok(idx);
                }
                Probe::Vacant(idx) => {
                    let slot = Slot::try_new(key, value).inspect_err(|_| {
                        warn!(
                            key_len = key.len(),
                            value_len = value.len(),
                            "failed to allocate entry buffers"
                        );
                    })?;
                    self.slots[idx] = Some(slot);
                    self.len += 1;
                    return Ok(idx);
                }
                // unreachable while the load bound holds
                Probe::Exhausted => self.grow()?,
            }
        }
    }

    /// Remove `key` from the table
    ///
    /// Returns `true` if the key was present.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };

        drop(self.slots.take(idx));
        self.len -= 1;
        self.backward_shift(idx);
        true
    }

    /// Close the hole at `removed` by pulling displaced entries back
    ///
    /// Walks forward until an empty slot. An entry whose home lies
    /// cyclically in `(gap, idx]` would become unreachable if moved, so it
    /// stays; every other entry moves into the gap and leaves a new one.
    fn backward_shift(&mut self, removed: usize) {
        let capacity = self.capacity();
        let mut gap = removed;

        for idx in ProbeSeq::from_index(removed, capacity).skip(1) {
            let home = match self.slots.get(idx) {
                Some(slot) => home_slot(self.hasher.hash(slot.key()), capacity),
                None => break,
            };

            if probe_distance(home, idx, capacity) >= probe_distance(gap, idx, capacity) {
                self.slots.relocate(idx, gap);
                self.observer.on_shift(idx, gap);
                trace!(from = idx, to = gap, "shifted entry back");
                gap = idx;
            }
        }
    }

    /// Double the capacity and rehash every entry
    ///
    /// Entries keep their buffers; only the slot handles move. If the new
    /// slot array cannot be allocated the table is left as it was.
    pub fn grow(&mut self) -> Result<(), Error> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(Error::CapacityOverflow)?;

        debug!(len = self.len, old_capacity, new_capacity, "growing table");

        let new_slots = SlotArray::try_new(new_capacity).inspect_err(|_| {
            warn!(capacity = new_capacity, "failed to allocate slot array");
        })?;
        let old_slots = std::mem::replace(&mut self.slots, new_slots);

        for slot in old_slots.into_occupied() {
            let hash = self.hasher.hash(slot.key());
            let idx = ProbeSeq::new(hash, new_capacity)
                .find(|&i| self.slots.is_empty_at(i))
                .expect("grown slot array has more slots than entries");
            self.slots[idx] = Some(slot);
        }

        self.observer.on_grow(old_capacity, new_capacity);
        debug!(len = self.len, capacity = new_capacity, "table grown");
        Ok(())
    }
}

impl<H, C, O> fmt::Debug for ShiftTable<H, C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiftTable")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<'a, H, C, O> IntoIterator for &'a ShiftTable<H, C, O> {
    type Item = (usize, Item<'a>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
