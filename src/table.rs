//! The fixed-capacity open-addressing table.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;
use core::fmt::Debug;
use core::ops::ControlFlow;

use crate::config::TableConfig;
use crate::error::Error;
use crate::key::render_key;
use crate::primes::next_prime_at_least;
use crate::probing::Landing;
use crate::strategy::Strategies;

/// The state of a slot, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    /// Never held an entry.
    Empty,
    /// Holds a live entry.
    Used,
    /// Held an entry that has since been removed.
    Deleted,
}

/// One element of the slot array.
///
/// Keys are copied into the slot on insert. A removed entry keeps its key
/// copy until the slot is reused, so dumps can show what used to be there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Never held an entry; terminates every probe chain.
    Empty,
    /// A live entry.
    Used {
        /// Owned copy of the key bytes.
        key: Box<[u8]>,
        /// The caller's value.
        value: V,
    },
    /// A tombstone. Free for insertion, but lookups walk past it.
    Deleted {
        /// The key of the removed entry.
        key: Box<[u8]>,
    },
}

impl<V> Slot<V> {
    /// The state of the slot.
    pub fn validity(&self) -> Validity {
        match self {
            Slot::Empty => Validity::Empty,
            Slot::Used { .. } => Validity::Used,
            Slot::Deleted { .. } => Validity::Deleted,
        }
    }

    /// The stored or retained key, if any.
    pub fn key(&self) -> Option<&[u8]> {
        match self {
            Slot::Empty => None,
            Slot::Used { key, .. } | Slot::Deleted { key } => Some(&**key),
        }
    }

    /// Turns a live entry into a tombstone, handing back its value.
    fn bury(&mut self) -> Option<V> {
        match core::mem::replace(self, Slot::Empty) {
            Slot::Used { key, value } => {
                *self = Slot::Deleted { key };
                Some(value)
            }
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Accumulated probing costs, per operation kind.
///
/// Counters only ever grow, until [`ProbeTable::reset_costs`].
///
/// - `insert` collects the charges of the probe strategy itself, whichever
///   operation triggered the probe (see
///   [`ProbeSequence::probe`](crate::probing::ProbeSequence::probe)).
/// - `search` and `delete` count the live slots whose key a lookup or removal
///   compared against. Empty slots and tombstones on the way are free, so a
///   miss on an empty home slot costs nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeCosts {
    /// Probe charges.
    pub insert: u64,
    /// Live slots compared by lookups.
    pub search: u64,
    /// Live slots compared by removals.
    pub delete: u64,
}

#[derive(Clone, Copy)]
enum Walk {
    Search,
    Delete,
}

/// Point-in-time statistics of a table.
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of slots.
    pub size: usize,
    /// Number of live entries.
    pub entries: usize,
    /// Number of tombstones.
    pub tombstones: usize,
    /// Number of never-used slots.
    pub empty: usize,
    /// `entries / size`.
    pub load_factor: f64,
    /// `(entries + tombstones) / size`. Lookups see tombstones as occupied.
    pub occupancy: f64,
    /// Costs accrued so far.
    pub costs: ProbeCosts,
}

impl TableStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Table Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.entries,
            self.size,
            self.load_factor * 100.0
        );
        println!(
            "Slots: {} empty, {} deleted ({:.2}% occupied incl. tombstones)",
            self.empty,
            self.tombstones,
            self.occupancy * 100.0
        );
        println!(
            "Costs: insert {}, search {}, delete {}",
            self.costs.insert, self.costs.search, self.costs.delete
        );
    }
}

/// A fixed-capacity open-addressing hash table over byte-string keys.
///
/// The table never grows. Its size is the smallest prime at least as large
/// as the requested capacity, and the hash and probe strategies are chosen
/// by name at creation time. Removal leaves a tombstone behind so probe
/// chains passing through the slot stay intact.
///
/// ## Example
///
/// ```rust
/// # use probe_table::{Error, ProbeTable};
/// let mut table = ProbeTable::new(5, "linear", "sum", "sum").unwrap();
///
/// // Anagrams collide under the sum hash.
/// let ab = table.insert(b"ab", 1).unwrap();
/// let ba = table.insert(b"ba", 2).unwrap();
/// assert_eq!(ba, (ab + 1) % table.capacity());
///
/// assert_eq!(table.insert(b"ab", 3), Err(Error::DuplicateKey));
/// assert_eq!(table.remove(b"ab"), Ok(1));
/// assert_eq!(table.get(b"ab"), Err(Error::NotFound));
/// assert_eq!(table.get(b"ba"), Ok(&2));
/// ```
#[derive(Clone)]
pub struct ProbeTable<V> {
    slots: Box<[Slot<V>]>,
    entries: usize,
    costs: Cell<ProbeCosts>,
    strategies: Strategies,
}

impl<V> Debug for ProbeTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use alloc::format;
        use alloc::string::String;

        f.debug_struct("ProbeTable")
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| match slot {
                        Slot::Empty => String::from(".."),
                        Slot::Used { key, .. } => render_key(key),
                        Slot::Deleted { key } => format!("deleted {}", render_key(key)),
                    })
                    .collect::<Vec<_>>(),
            )
            .field("entries", &self.entries)
            .field("size", &self.slots.len())
            .field("costs", &self.costs.get())
            .field("strategies", &self.strategies)
            .finish()
    }
}

impl<V> ProbeTable<V> {
    /// Creates a table with at least `capacity` slots.
    ///
    /// Strategy names are matched on their first three characters:
    /// `lin`/`qua`/`dou` for `probe`, `sum`/`len`/`wei` for the hashes.
    /// Unknown names fall back to linear probing and the sum hash with a
    /// logged warning.
    ///
    /// Fails with [`Error::CapacityExhausted`] if no prime size is available.
    ///
    /// ```rust
    /// # use probe_table::ProbeTable;
    /// let table: ProbeTable<&str> = ProbeTable::new(10, "double", "weighted", "len").unwrap();
    /// assert_eq!(table.capacity(), 11);
    /// assert!(table.is_empty());
    /// ```
    pub fn new(
        capacity: usize,
        probe: &str,
        primary: &str,
        secondary: &str,
    ) -> Result<Self, Error> {
        Self::with_strategies(capacity, Strategies::resolve(probe, primary, secondary))
    }

    /// Creates a table from a [`TableConfig`].
    pub fn with_config(config: &TableConfig) -> Result<Self, Error> {
        Self::new(
            config.capacity,
            &config.probe,
            &config.primary,
            &config.secondary,
        )
    }

    /// Creates a table with already resolved strategies.
    pub fn with_strategies(capacity: usize, strategies: Strategies) -> Result<Self, Error> {
        let Some(size) = next_prime_at_least(capacity) else {
            log::debug!("cannot create table of size {capacity}");
            return Err(Error::CapacityExhausted);
        };

        log::debug!(
            "created table of {size} slots (requested {capacity}): '{}' hash, '{}' secondary, '{}' probing",
            strategies.primary.name(),
            strategies.secondary.name(),
            strategies.probe.name(),
        );

        Ok(ProbeTable {
            slots: (0..size).map(|_| Slot::Empty).collect(),
            entries: 0,
            costs: Cell::new(ProbeCosts::default()),
            strategies,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of slots. Always prime, never changes.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The strategies this table was created with.
    pub fn strategies(&self) -> &Strategies {
        &self.strategies
    }

    /// Costs accrued since creation or the last [`ProbeTable::reset_costs`].
    pub fn costs(&self) -> ProbeCosts {
        self.costs.get()
    }

    /// Zeroes all cost counters.
    pub fn reset_costs(&mut self) {
        self.costs.set(ProbeCosts::default());
    }

    /// The raw slot array, in storage order.
    pub fn slots(&self) -> &[Slot<V>] {
        &self.slots
    }

    #[inline(always)]
    fn home(&self, key: &[u8]) -> usize {
        self.strategies.primary.index(key, self.slots.len())
    }

    #[inline(always)]
    fn charge(&self, f: impl FnOnce(&mut ProbeCosts)) {
        let mut costs = self.costs.get();
        f(&mut costs);
        self.costs.set(costs);
    }

    /// Inserts `key` with `value` and returns the slot index it was placed in.
    ///
    /// The key bytes are copied. The first tombstone on the probe chain is
    /// reused, but only after the rest of the chain has been checked for the
    /// key.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if the key is already present. The existing
    ///   value is kept and `value` is dropped.
    /// - [`Error::CapacityExhausted`] if every slot is live, or the probe
    ///   sequence ran out without finding a free slot. Quadratic probing can
    ///   hit the latter while some slots are still free.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<usize, Error> {
        let size = self.slots.len();
        if self.entries >= size {
            log::debug!("insert of {} rejected: all {size} slots live", render_key(key));
            return Err(Error::CapacityExhausted);
        }

        let home = self.home(key);
        let mut tombstone = None;
        let mut probe_cost = 0;

        let empty = match Landing::of(&self.slots[home], key) {
            Landing::Empty => Some(home),
            Landing::Match => return Err(Error::DuplicateKey),
            landing => {
                if landing == Landing::Tombstone {
                    tombstone = Some(home);
                }

                let mut seq = self
                    .strategies
                    .probe
                    .sequence(self.strategies.secondary, key, home, size);
                let outcome = loop {
                    let Some(index) = seq.probe(&self.slots, key, false, &mut probe_cost) else {
                        break Ok(None);
                    };
                    match Landing::of(&self.slots[index], key) {
                        Landing::Empty => break Ok(Some(index)),
                        Landing::Match => break Err(Error::DuplicateKey),
                        Landing::Tombstone => {
                            tombstone.get_or_insert(index);
                        }
                        Landing::Collision => {}
                    }
                };

                self.charge(|c| c.insert += probe_cost);
                outcome?
            }
        };

        let Some(index) = tombstone.or(empty) else {
            log::debug!(
                "insert of {} rejected: '{}' probe sequence from slot {home} exhausted",
                render_key(key),
                self.strategies.probe.name()
            );
            return Err(Error::CapacityExhausted);
        };

        log::trace!("{} placed in slot {index} (home {home})", render_key(key));
        self.slots[index] = Slot::Used {
            key: Box::from(key),
            value,
        };
        self.entries += 1;
        Ok(index)
    }

    /// Walks the probe chain of `key`, through tombstones, and returns the
    /// index of its live slot.
    fn locate(&self, key: &[u8], walk: Walk) -> Option<usize> {
        let size = self.slots.len();
        let home = self.home(key);
        let probe = self.strategies.probe;
        let mut compared = 0u64;
        let mut probe_cost = 0u64;

        let found = match Landing::of(&self.slots[home], key) {
            Landing::Match => {
                compared += 1;
                Some(home)
            }
            Landing::Empty => None,
            landing => {
                if landing == Landing::Collision {
                    compared += 1;
                }

                let seq = probe.sequence(self.strategies.secondary, key, home, size);
                let mut found = None;
                for index in seq {
                    let landing = Landing::of(&self.slots[index], key);
                    if probe.charges(landing) {
                        probe_cost += 1;
                    }

                    match landing {
                        Landing::Match => {
                            compared += 1;
                            found = Some(index);
                            break;
                        }
                        Landing::Collision => compared += 1,
                        Landing::Tombstone => {}
                        Landing::Empty => break,
                    }
                }
                found
            }
        };

        self.charge(|c| {
            c.insert += probe_cost;
            match walk {
                Walk::Search => c.search += compared,
                Walk::Delete => c.delete += compared,
            }
        });
        found
    }

    /// Looks up the value stored under `key`.
    ///
    /// Charges the search counter one unit per live slot compared.
    pub fn get(&self, key: &[u8]) -> Result<&V, Error> {
        match self.locate(key, Walk::Search).map(|i| &self.slots[i]) {
            Some(Slot::Used { value, .. }) => Ok(value),
            _ => Err(Error::NotFound),
        }
    }

    /// Looks up the value stored under `key` for modification.
    pub fn get_mut(&mut self, key: &[u8]) -> Result<&mut V, Error> {
        match self.locate(key, Walk::Search).map(|i| &mut self.slots[i]) {
            Some(Slot::Used { value, .. }) => Ok(value),
            _ => Err(Error::NotFound),
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_ok()
    }

    /// Removes `key`, leaving a tombstone, and returns its value.
    ///
    /// Charges the delete counter one unit per live slot compared.
    pub fn remove(&mut self, key: &[u8]) -> Result<V, Error> {
        let index = self.locate(key, Walk::Delete).ok_or(Error::NotFound)?;
        let value = self.slots[index].bury().ok_or(Error::NotFound)?;
        self.entries -= 1;
        Ok(value)
    }

    /// Returns an iterator over the live entries in storage order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Calls `visit` on every live entry in storage order, stopping as soon as
    /// it breaks.
    ///
    /// ```rust
    /// # use core::ops::ControlFlow;
    /// # use probe_table::ProbeTable;
    /// let mut table = ProbeTable::new(11, "linear", "weighted", "sum").unwrap();
    /// for (i, word) in ["alpha", "beta", "gamma"].iter().enumerate() {
    ///     table.insert(word.as_bytes(), i).unwrap();
    /// }
    ///
    /// let mut seen = 0;
    /// let outcome = table.try_for_each(|_key, &value| {
    ///     seen += 1;
    ///     if value == 1 { ControlFlow::Break(value) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(outcome, ControlFlow::Break(1));
    /// assert!(seen <= 3);
    /// ```
    pub fn try_for_each<B>(
        &self,
        mut visit: impl FnMut(&[u8], &V) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.iter().try_for_each(|(key, value)| visit(key, value))
    }

    /// Writes one line per slot, each prefixed with `tag`.
    pub fn dump(&self, out: &mut impl fmt::Write, tag: &str) -> fmt::Result {
        writeln!(out, "{tag}Dumping table of {} slots:", self.slots.len())?;
        for (i, slot) in self.slots.iter().enumerate() {
            write!(out, "{tag}  ")?;
            match slot {
                Slot::Used { key, .. } => writeln!(out, "{i} : in use : '{}'", render_key(key))?,
                Slot::Empty => writeln!(out, "{i} : empty")?,
                Slot::Deleted { key } => {
                    writeln!(out, "{i} : empty (deleted - was '{}')", render_key(key))?
                }
            }
        }
        Ok(())
    }

    /// Writes the entry count, strategies and accrued costs.
    pub fn summary(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let costs = self.costs.get();
        writeln!(
            out,
            "Table contains {} entries in a table of {} slots",
            self.entries,
            self.slots.len()
        )?;
        writeln!(
            out,
            "Strategies used: '{}' hash, '{}' secondary hash and '{}' probing",
            self.strategies.primary_name, self.strategies.secondary_name, self.strategies.probe_name
        )?;
        writeln!(out, "Costs accrued due to probing:")?;
        writeln!(out, "  Insertion : {}", costs.insert)?;
        writeln!(out, "  Search    : {}", costs.search)?;
        writeln!(out, "  Deletion  : {}", costs.delete)
    }

    /// Returns a snapshot of slot usage and costs.
    pub fn stats(&self) -> TableStats {
        let tombstones = self
            .slots
            .iter()
            .filter(|s| s.validity() == Validity::Deleted)
            .count();
        let size = self.slots.len();

        TableStats {
            size,
            entries: self.entries,
            tombstones,
            empty: size - self.entries - tombstones,
            load_factor: self.entries as f64 / size as f64,
            occupancy: (self.entries + tombstones) as f64 / size as f64,
            costs: self.costs.get(),
        }
    }

    /// Histogram of how far each live entry sits from its home slot, in probe
    /// attempts. Index `0` counts entries sitting in their home slot.
    pub fn probe_histogram(&self) -> Vec<usize> {
        let size = self.slots.len();
        let mut hist = Vec::new();

        for (index, slot) in self.slots.iter().enumerate() {
            let Slot::Used { key, .. } = slot else {
                continue;
            };

            let home = self.home(key);
            let distance = if home == index {
                0
            } else {
                let mut seq = self
                    .strategies
                    .probe
                    .sequence(self.strategies.secondary, key, home, size);
                match seq.find(|&i| i == index) {
                    Some(_) => seq.attempt() - 1,
                    None => continue,
                }
            };

            if hist.len() <= distance {
                hist.resize(distance + 1, 0);
            }
            hist[distance] += 1;
        }

        hist
    }

    /// Pretty-prints the probe-distance histogram as a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.entries);
        for (distance, &count) in hist.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{distance:>3} | {} ({count})", "█".repeat(width));
        }
    }
}

/// An iterator over the live entries of a [`ProbeTable`], in storage order.
///
/// Created by [`ProbeTable::iter`].
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| match slot {
            Slot::Used { key, value } => Some((&**key, value)),
            _ => None,
        })
    }
}

impl<'a, V> IntoIterator for &'a ProbeTable<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
