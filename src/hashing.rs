//! The primary and secondary hash functions a table can be built with.
//!
//! All of these are deliberately simple so their collision behaviour is easy
//! to reason about when comparing probe strategies. None of them is suitable
//! as a general-purpose hasher.

/// A hash function mapping a key onto a slot index in `[0, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashStrategy {
    /// `len(key) mod size`. Every key of the same length lands on the same
    /// slot.
    Length,
    /// Sum of the key bytes, `mod size`. Anagrams collide.
    Sum,
    /// Sum of `byte[i] * (i + 1)`, `mod size`. Position-sensitive, so
    /// anagrams usually separate.
    WeightedSum,
}

impl HashStrategy {
    /// All hash strategies, in registry order.
    pub const ALL: [HashStrategy; 3] = [
        HashStrategy::Sum,
        HashStrategy::Length,
        HashStrategy::WeightedSum,
    ];

    /// Computes the slot index of `key` in a table of `size` slots.
    ///
    /// `size` must be non-zero.
    ///
    /// ```rust
    /// # use probe_table::HashStrategy;
    /// assert_eq!(HashStrategy::Sum.index(b"ab", 7), (97 + 98) % 7);
    /// assert_eq!(HashStrategy::Length.index(b"ab", 7), 2);
    /// ```
    #[inline]
    pub fn index(self, key: &[u8], size: usize) -> usize {
        debug_assert!(size > 0);
        let raw = match self {
            HashStrategy::Length => key.len() as u64,
            HashStrategy::Sum => hash_by_sum(key),
            HashStrategy::WeightedSum => hash_by_weighted_sum(key),
        };
        (raw % size as u64) as usize
    }
}

#[inline(always)]
fn hash_by_sum(key: &[u8]) -> u64 {
    key.iter().fold(0u64, |acc, &b| acc.wrapping_add(b as u64))
}

#[inline(always)]
fn hash_by_weighted_sum(key: &[u8]) -> u64 {
    key.iter().enumerate().fold(0u64, |acc, (i, &b)| {
        acc.wrapping_add((b as u64).wrapping_mul(i as u64 + 1))
    })
}
