//! Open-addressing hash table for byte-string keys and values.
//!
//! - Linear probing from `hash mod capacity` over a power-of-two slot array
//! - Doubles and rehashes once occupancy reaches 75%
//! - Backward-shift deletion, no tombstones
//! - Pluggable hash and key-equality strategies
//! - Fallible allocation surfaced as [`Error::OutOfMemory`]
//!
//! ```
//! use shifttable::{BytesEq, FastHash, ShiftTable, TableConfig};
//!
//! let config = TableConfig::new().initial_capacity(64);
//! let mut table = ShiftTable::with_config(FastHash, BytesEq, config)?;
//!
//! table.put(b"hello", b"world")?;
//! assert_eq!(table.get(b"hello").map(|item| item.value()), Some(&b"world"[..]));
//!
//! assert!(table.delete(b"hello"));
//! assert!(table.get(b"hello").is_none());
//! # Ok::<(), shifttable::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod iter;
pub mod observer;
pub mod probe;
pub mod slot;
pub mod strategy;
pub mod table;

pub use config::{TableConfig, INITIAL_CAPACITY};
pub use error::Error;
pub use iter::{Item, Iter};
pub use observer::{Counters, ProbeObserver};
pub use strategy::{ByteEq, ByteHash, BytesEq, Djb1Hash, FastHash, KeyEq, KeyHasher};
pub use table::ShiftTable;

#[cfg(test)]
mod tests;
