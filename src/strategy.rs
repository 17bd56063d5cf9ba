//! Hash and key-equality strategies.
//!
//! A table is generic over a [`KeyHasher`] and a [`KeyEq`]. Any closure or
//! `fn` with the right signature works; a handful of reference strategies
//! are provided here.

use xxhash_rust::xxh3::xxh3_64;

/// Hashes a key's bytes to a 64-bit value
pub trait KeyHasher {
    fn hash(&self, key: &[u8]) -> u64;
}

/// Decides whether a stored key and a probe key are the same key
///
/// Only equality matters; there is no ordering.
pub trait KeyEq {
    fn key_eq(&self, stored: &[u8], probe: &[u8]) -> bool;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u64,
{
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        self(key)
    }
}

impl<F> KeyEq for F
where
    F: Fn(&[u8], &[u8]) -> bool,
{
    #[inline]
    fn key_eq(&self, stored: &[u8], probe: &[u8]) -> bool {
        self(stored, probe)
    }
}

/// Uses the first byte of the key as its hash. Empty keys hash to 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ByteHash;

impl KeyHasher for ByteHash {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        key.first().copied().map_or(0, u64::from)
    }
}

/// Daniel Bernstein's first string hash (`h * 33 + c`, seeded with 5381)
///
/// Accumulates in a wrapping 32-bit word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Djb1Hash;

impl Djb1Hash {
    const SEED: u32 = 5381;
}

impl KeyHasher for Djb1Hash {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        let hash = key.iter().fold(Self::SEED, |h, &b| {
            (h << 5).wrapping_add(h).wrapping_add(u32::from(b))
        });
        u64::from(hash)
    }
}

/// General-purpose fast hash (XXH3, 64-bit)
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FastHash;

impl KeyHasher for FastHash {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        xxh3_64(key)
    }
}

/// Compares only the first byte of each key
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ByteEq;

impl KeyEq for ByteEq {
    #[inline]
    fn key_eq(&self, stored: &[u8], probe: &[u8]) -> bool {
        stored.first() == probe.first()
    }
}

/// Compares lengths, then contents
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BytesEq;

impl KeyEq for BytesEq {
    #[inline]
    fn key_eq(&self, stored: &[u8], probe: &[u8]) -> bool {
        stored.len() == probe.len() && stored == probe
    }
}
