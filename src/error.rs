use alloc::string::String;

use thiserror::Error;

/// Errors returned by [`ProbeTable`](crate::ProbeTable) operations.
///
/// None of these leave the table in a bad state; it stays usable after any of
/// them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No prime table size is available for the requested capacity, or an
    /// insert found no free slot along its probe chain.
    #[error("capacity exhausted")]
    CapacityExhausted,
    /// The key is already present. The stored value was left untouched.
    #[error("key already present")]
    DuplicateKey,
    /// The key is not present.
    #[error("key not found")]
    NotFound,
    /// A strategy name did not match any known strategy.
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),
}
