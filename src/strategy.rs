//! Strategy lookup by name.
//!
//! Names are matched on their first three characters, so `"lin"`, `"linear"`
//! and `"linear-probing"` all select [`ProbeStrategy::Linear`]. The lenient
//! `from_name` lookups fall back to a default and log a warning; the strict
//! `parse`/[`FromStr`] lookups report unknown names instead.

use alloc::string::String;
use alloc::string::ToString;
use core::str::FromStr;

use crate::error::Error;
use crate::hashing::HashStrategy;
use crate::probing::ProbeStrategy;

const PREFIX_LEN: usize = 3;

#[inline(always)]
fn prefix(name: &str) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..bytes.len().min(PREFIX_LEN)]
}

impl HashStrategy {
    /// The hash used when a name is not recognised.
    pub const DEFAULT: HashStrategy = HashStrategy::Sum;

    /// Looks up a hash strategy by name prefix (`sum`, `len`, `wei`).
    ///
    /// ```rust
    /// # use probe_table::HashStrategy;
    /// assert_eq!(HashStrategy::parse("weighted"), Some(HashStrategy::WeightedSum));
    /// assert_eq!(HashStrategy::parse("md5"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match prefix(name) {
            b"sum" => Some(HashStrategy::Sum),
            b"len" => Some(HashStrategy::Length),
            b"wei" => Some(HashStrategy::WeightedSum),
            _ => None,
        }
    }

    /// Like [`HashStrategy::parse`], but falls back to
    /// [`HashStrategy::DEFAULT`] with a logged warning.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!(
                "invalid hash strategy '{name}' - using '{}'",
                Self::DEFAULT.name()
            );
            Self::DEFAULT
        })
    }

    /// Canonical name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            HashStrategy::Length => "length",
            HashStrategy::Sum => "sum",
            HashStrategy::WeightedSum => "weighted",
        }
    }
}

impl FromStr for HashStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

impl ProbeStrategy {
    /// The probe used when a name is not recognised.
    pub const DEFAULT: ProbeStrategy = ProbeStrategy::Linear;

    /// Looks up a probe strategy by name prefix (`lin`, `qua`, `dou`).
    ///
    /// ```rust
    /// # use probe_table::ProbeStrategy;
    /// assert_eq!(ProbeStrategy::parse("double"), Some(ProbeStrategy::DoubleHash));
    /// assert_eq!(ProbeStrategy::parse("cuckoo"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        match prefix(name) {
            b"lin" => Some(ProbeStrategy::Linear),
            b"qua" => Some(ProbeStrategy::Quadratic),
            b"dou" => Some(ProbeStrategy::DoubleHash),
            _ => None,
        }
    }

    /// Like [`ProbeStrategy::parse`], but falls back to
    /// [`ProbeStrategy::DEFAULT`] with a logged warning.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!(
                "invalid hash probe strategy '{name}' - using '{}'",
                Self::DEFAULT.name()
            );
            Self::DEFAULT
        })
    }

    /// Canonical name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            ProbeStrategy::Linear => "linear",
            ProbeStrategy::Quadratic => "quadratic",
            ProbeStrategy::DoubleHash => "double",
        }
    }
}

impl FromStr for ProbeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// The resolved strategies of a table, together with the names they were
/// requested under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategies {
    /// Collision resolution.
    pub probe: ProbeStrategy,
    /// Picks the home slot of a key.
    pub primary: HashStrategy,
    /// Picks the step for double hashing. Unused by the other probes.
    pub secondary: HashStrategy,
    /// `probe` as the caller named it.
    pub probe_name: String,
    /// `primary` as the caller named it.
    pub primary_name: String,
    /// `secondary` as the caller named it.
    pub secondary_name: String,
}

impl Strategies {
    /// Resolves all three names leniently, see the `from_name` lookups.
    pub fn resolve(probe: &str, primary: &str, secondary: &str) -> Self {
        Strategies {
            probe: ProbeStrategy::from_name(probe),
            primary: HashStrategy::from_name(primary),
            secondary: HashStrategy::from_name(secondary),
            probe_name: probe.to_string(),
            primary_name: primary.to_string(),
            secondary_name: secondary.to_string(),
        }
    }
}

impl Default for Strategies {
    fn default() -> Self {
        Strategies {
            probe: ProbeStrategy::DEFAULT,
            primary: HashStrategy::DEFAULT,
            secondary: HashStrategy::DEFAULT,
            probe_name: ProbeStrategy::DEFAULT.name().to_string(),
            primary_name: HashStrategy::DEFAULT.name().to_string(),
            secondary_name: HashStrategy::DEFAULT.name().to_string(),
        }
    }
}
