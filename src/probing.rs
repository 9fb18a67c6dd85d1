//! Collision resolution.
//!
//! A probe is started once the primary slot of a key is taken by a different
//! key. It walks a deterministic sequence of candidate slots and stops on the
//! first slot that is either free (empty or a tombstone) or holds the key
//! being probed for. Which of the two it stopped on is for the caller to find
//! out by looking at the slot.
//!
//! Every sequence is bounded by the table size, so probing a full table
//! terminates with `None` instead of looping.

use crate::hashing::HashStrategy;
use crate::table::Slot;

/// A collision resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStrategy {
    /// `start + attempt`, one slot at a time. Visits every slot.
    Linear,
    /// `start + attempt²`. On a prime-sized table this reaches roughly half of
    /// the slots, so a table can report exhaustion while slots are still free.
    Quadratic,
    /// `start + attempt * step` with `step` taken from the secondary hash.
    /// Visits every slot but the start on a prime-sized table.
    DoubleHash,
}

/// What a probe found at a candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Landing {
    Empty,
    Tombstone,
    Match,
    Collision,
}

impl Landing {
    #[inline(always)]
    pub(crate) fn of<V>(slot: &Slot<V>, key: &[u8]) -> Self {
        match slot {
            Slot::Empty => Landing::Empty,
            Slot::Deleted { .. } => Landing::Tombstone,
            Slot::Used { key: stored, .. } if crate::key::keys_match(stored, key) => Landing::Match,
            Slot::Used { .. } => Landing::Collision,
        }
    }
}

impl ProbeStrategy {
    /// All probe strategies, in registry order.
    pub const ALL: [ProbeStrategy; 3] = [
        ProbeStrategy::Linear,
        ProbeStrategy::Quadratic,
        ProbeStrategy::DoubleHash,
    ];

    /// Builds the probe sequence for `key` whose primary slot is `start` in a
    /// table of `size` slots.
    ///
    /// The primary slot itself is never yielded: every strategy begins at
    /// attempt 1 and stops after attempt `size - 1`.
    ///
    /// `secondary` only matters for [`ProbeStrategy::DoubleHash`]; a secondary
    /// hash of zero is turned into a step of one so the sequence always moves.
    pub fn sequence(
        self,
        secondary: HashStrategy,
        key: &[u8],
        start: usize,
        size: usize,
    ) -> ProbeSequence {
        debug_assert!(start < size);
        let step = match self {
            ProbeStrategy::Linear => 1,
            ProbeStrategy::Quadratic => 0,
            ProbeStrategy::DoubleHash => secondary.index(key, size).max(1),
        };

        ProbeSequence {
            strategy: self,
            start,
            step,
            size,
            attempt: 1,
        }
    }

    /// Probes from `start` for a slot that is free or holds `key`.
    ///
    /// Returns the index of that slot, or `None` if the sequence ran out, or
    /// if `stop_on_tombstone` is set and a tombstone was reached first.
    /// `cost` is charged according to the strategy (see [`ProbeSequence::probe`]).
    pub fn probe<V>(
        self,
        slots: &[Slot<V>],
        key: &[u8],
        start: usize,
        stop_on_tombstone: bool,
        secondary: HashStrategy,
        cost: &mut u64,
    ) -> Option<usize> {
        self.sequence(secondary, key, start, slots.len())
            .probe(slots, key, stop_on_tombstone, cost)
    }

    #[inline(always)]
    pub(crate) fn charges(self, landing: Landing) -> bool {
        match self {
            ProbeStrategy::Linear => matches!(landing, Landing::Empty | Landing::Tombstone),
            ProbeStrategy::Quadratic => true,
            ProbeStrategy::DoubleHash => landing != Landing::Match,
        }
    }
}

/// A resumable probe sequence.
///
/// Iterating yields candidate indices. [`ProbeSequence::probe`] skips over
/// collisions and stops on the next interesting slot, leaving the sequence
/// positioned after it so the caller can carry on past a tombstone.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    strategy: ProbeStrategy,
    start: usize,
    step: usize,
    size: usize,
    attempt: usize,
}

impl ProbeSequence {
    /// The attempt number the next candidate will be generated from.
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Advances to the next slot that is free or holds `key`.
    ///
    /// Cost accounting per landing:
    /// - linear charges one unit for every free slot it stops on,
    /// - quadratic charges every attempt,
    /// - double hashing charges every attempt except a match.
    pub fn probe<V>(
        &mut self,
        slots: &[Slot<V>],
        key: &[u8],
        stop_on_tombstone: bool,
        cost: &mut u64,
    ) -> Option<usize> {
        debug_assert_eq!(slots.len(), self.size);
        let strategy = self.strategy;
        for index in self.by_ref() {
            let landing = Landing::of(&slots[index], key);
            if strategy.charges(landing) {
                *cost += 1;
            }

            match landing {
                Landing::Collision => continue,
                Landing::Tombstone if stop_on_tombstone => return None,
                _ => return Some(index),
            }
        }

        None
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.attempt >= self.size {
            return None;
        }

        let attempt = self.attempt as u64;
        let size = self.size as u64;
        self.attempt += 1;

        let offset = match self.strategy {
            ProbeStrategy::Linear => attempt,
            ProbeStrategy::Quadratic => (attempt * attempt) % size,
            ProbeStrategy::DoubleHash => (attempt * self.step as u64) % size,
        };
        Some(((self.start as u64 + offset) % size) as usize)
    }
}
