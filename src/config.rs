//! Builder-style table configuration.
//!
//! A [`TableConfig`] only records names; they are resolved when
//! [`ProbeTable::with_config`](crate::ProbeTable::with_config) builds the
//! table.

use alloc::string::String;
use alloc::string::ToString;

/// Builder-style description of a table to create.
///
/// Strategy names are resolved leniently when the table is built: an unknown
/// name falls back to the default strategy with a logged warning.
///
/// ```rust
/// # use probe_table::{ProbeTable, TableConfig};
/// let table: ProbeTable<u32> = ProbeTable::with_config(
///     &TableConfig::new(100).probe("quadratic").hash("weighted"),
/// )
/// .unwrap();
/// assert_eq!(table.capacity(), 101);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub(crate) capacity: usize,
    pub(crate) probe: String,
    pub(crate) primary: String,
    pub(crate) secondary: String,
}

impl TableConfig {
    /// A configuration for at least `capacity` slots using linear probing and
    /// the sum hash for both hash roles.
    pub fn new(capacity: usize) -> Self {
        TableConfig {
            capacity,
            probe: "linear".to_string(),
            primary: "sum".to_string(),
            secondary: "sum".to_string(),
        }
    }

    /// Sets the probe strategy by name.
    pub fn probe(mut self, name: impl Into<String>) -> Self {
        self.probe = name.into();
        self
    }

    /// Sets the primary hash strategy by name.
    pub fn hash(mut self, name: impl Into<String>) -> Self {
        self.primary = name.into();
        self
    }

    /// Sets the secondary hash strategy, used for the double hashing step.
    pub fn secondary_hash(mut self, name: impl Into<String>) -> Self {
        self.secondary = name.into();
        self
    }

    /// Requested minimum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::new(0)
    }
}
