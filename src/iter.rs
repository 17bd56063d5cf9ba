//! Borrowed entry views and iteration for `ShiftTable`

use crate::slot::Slot;

/// A borrowed view of one stored entry
///
/// Valid until the table is next mutated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Item<'a> {
    key: &'a [u8],
    value: &'a [u8],
}

impl<'a> Item<'a> {
    #[inline]
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    #[inline]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    #[inline]
    pub fn key_len(&self) -> usize {
        self.key.len()
    }

    #[inline]
    pub fn value_len(&self) -> usize {
        self.value.len()
    }
}

impl<'a> From<&'a Slot> for Item<'a> {
    #[inline]
    fn from(slot: &'a Slot) -> Self {
        Self {
            key: slot.key(),
            value: slot.value(),
        }
    }
}

/// An iterator over the occupied slots of a `ShiftTable`
///
/// Yields `(slot_index, item)` in slot order.
pub struct Iter<'a> {
    inner: Box<dyn Iterator<Item = (usize, Item<'a>)> + 'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = (usize, Item<'a>)> + 'a,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, Item<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
