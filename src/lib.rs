#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
mod error;
pub mod hashing;
pub mod key;
pub mod primes;
pub mod probing;
pub mod strategy;
pub mod table;

#[cfg(test)]
mod proptests;

pub use config::TableConfig;
pub use error::Error;
pub use hashing::HashStrategy;
pub use probing::ProbeStrategy;
pub use strategy::Strategies;
pub use table::ProbeCosts;
pub use table::ProbeTable;
pub use table::Slot;
pub use table::Validity;
