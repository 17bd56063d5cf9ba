//! Slot storage with owned key and value buffers.
//!
//! - One slot per array index, `None` when empty
//! - Keys and values live in exact-length boxed byte slices
//! - Buffers are allocated fallibly; relocation moves the boxes, never the bytes

use std::ops::{Index, IndexMut};

use crate::error::Error;

/// Copy `bytes` into a new exact-length buffer without aborting on OOM
fn try_clone_bytes(bytes: &[u8]) -> Result<Box<[u8]>, Error> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}

/// An occupied slot: an owned key and its owned value
#[derive(Debug, Eq, PartialEq)]
pub struct Slot {
    key: Box<[u8]>,
    value: Box<[u8]>,
}

impl Slot {
    /// Copy key and value into freshly allocated buffers
    pub fn try_new(key: &[u8], value: &[u8]) -> Result<Self, Error> {
        let key = try_clone_bytes(key)?;
        let value = try_clone_bytes(value)?;
        Ok(Self { key, value })
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Replace the value, leaving the old one untouched if allocation fails
    pub fn try_replace_value(&mut self, value: &[u8]) -> Result<(), Error> {
        self.value = try_clone_bytes(value)?;
        Ok(())
    }
}

/// Fixed-size array of slots
#[derive(Debug)]
pub struct SlotArray {
    slots: Box<[Option<Slot>]>,
}

impl SlotArray {
    /// Allocate `capacity` empty slots
    pub fn try_new(capacity: usize) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }

    /// Number of slots, occupied or not
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Slot> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_empty_at(&self, idx: usize) -> bool {
        self.slots[idx].is_none()
    }

    /// Take the slot at `idx`, leaving it empty
    #[inline]
    pub fn take(&mut self, idx: usize) -> Option<Slot> {
        self.slots[idx].take()
    }

    /// Move the slot at `from` into the empty slot at `to`
    #[inline]
    pub fn relocate(&mut self, from: usize, to: usize) {
        debug_assert!(self.slots[to].is_none());
        self.slots[to] = self.slots[from].take();
    }

    /// Iterate over occupied slots with their indices
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|s| (idx, s)))
    }

    /// Consume the array, yielding every occupied slot
    pub fn into_occupied(self) -> impl Iterator<Item = Slot> {
        self.slots.into_vec().into_iter().flatten()
    }
}

impl Index<usize> for SlotArray {
    type Output = Option<Slot>;

    #[inline]
    fn index(&self, idx: usize) -> &Option<Slot> {
        &self.slots[idx]
    }
}

impl IndexMut<usize> for SlotArray {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Option<Slot> {
        &mut self.slots[idx]
    }
}
