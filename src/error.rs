//! Error type for fallible table operations

use std::collections::TryReserveError;

/// Errors surfaced by table construction, insertion and growth.
///
/// Missing keys are not errors: `get` returns `None` and `delete` returns
/// `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The allocator could not provide a slot array or a key/value buffer
    #[error("out of memory")]
    OutOfMemory,

    /// Doubling the capacity would overflow `usize`
    #[error("capacity overflow")]
    CapacityOverflow,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
