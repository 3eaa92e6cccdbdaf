use std::cell::Cell;
use std::fmt;

use tracing::debug;

use crate::config::{HashVariant, TableConfig};
use crate::error::{Error, Result};
use crate::util::hash::KeyHasher;

/// Where a probe for a key stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Found(usize),
    Vacant(usize),
    Exhausted,
}

/// Open-addressed table keyed by string, resolving conflicts by linear
/// probing. The backing array never grows and entries are never removed.
///
/// Three counters are kept: how many insertions missed their hashed slot
/// (`conflict_count`), the total number of occupied slots stepped over by any
/// probe, lookups included (`probe_total`), and the longest probe chain an
/// insertion walked (`probe_max`).
#[derive(Debug, Clone)]
pub struct LinearProbeTable<V, H = HashVariant> {
    table: Vec<Option<(String, V)>>,
    count: usize,
    hasher: H,
    conflict_count: usize,
    probe_total: Cell<usize>, //lookups add to it through &self
    probe_max: usize,
}

impl<V> LinearProbeTable<V, HashVariant> {
    pub fn new(config: &TableConfig) -> Result<Self> {
        Self::with_hasher(config, config.hash_variant)
    }
}

impl<V, H: KeyHasher> LinearProbeTable<V, H> {
    ///Sizes the table from `config`, hashing with `hasher` instead of `config.hash_variant`
    pub fn with_hasher(config: &TableConfig, hasher: H) -> Result<Self> {
        let table_size = config.table_size()?;
        debug!(table_size, expected = config.expected_entry_count, "creating probe table");
        Ok(Self {
            table: (0..table_size).map(|_| None).collect(),
            count: 0,
            hasher,
            conflict_count: 0,
            probe_total: Cell::new(0),
            probe_max: 0,
        })
    }

    ///Number of elements in the table
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
    pub fn is_full(&self) -> bool {
        self.count == self.table.len()
    }
    pub fn table_size(&self) -> usize {
        self.table.len()
    }
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
    ///(conflict_count, probe_total, probe_max)
    pub fn statistics(&self) -> (usize, usize, usize) {
        (self.conflict_count, self.probe_total.get(), self.probe_max)
    }
    ///Slot the probe for key starts at
    pub fn hash(&self, key: &str) -> usize {
        self.hasher.hash(key, self.table.len()) % self.table.len()
    }

    ///Walks from the hashed slot, returns where it stopped and how many slots it stepped over
    fn probe(&self, key: &str) -> (Probe, usize) {
        let table_size = self.table.len();
        let mut position = self.hash(key);
        for steps in 0..table_size {
            match &self.table[position] {
                None => return (Probe::Vacant(position), steps),
                Some((stored, _)) if stored == key => return (Probe::Found(position), steps),
                Some(_) => position = (position + 1) % table_size,
            }
        }
        (Probe::Exhausted, table_size)
    }
    ///Probes for key, counting the steps taken
    fn counted_probe(&self, key: &str) -> Probe {
        let (probe, steps) = self.probe(key);
        self.probe_total.set(self.probe_total.get() + steps);
        probe
    }
    fn position(&self, key: &str) -> Option<usize> {
        match self.counted_probe(key) {
            Probe::Found(position) => Some(position),
            _ => None,
        }
    }

    /// Inserts or overwrites `key`. A new key in a full table fails with
    /// [`Error::TableFull`] and records no probe steps; an existing key can
    /// always be overwritten.
    pub fn insert(&mut self, key: &str, value: V) -> Result<()> {
        let (probe, steps) = self.probe(key);
        match probe {
            Probe::Found(position) => {
                *self.probe_total.get_mut() += steps;
                self.table[position] = Some((key.to_string(), value));
            }
            Probe::Vacant(position) => {
                *self.probe_total.get_mut() += steps;
                if steps > 0 {
                    self.conflict_count += 1;
                    self.probe_max = self.probe_max.max(steps);
                }
                self.table[position] = Some((key.to_string(), value));
                self.count += 1;
            }
            //only a full table can be walked end to end without a match
            Probe::Exhausted => {
                debug!(key, table_size = self.table.len(), "rejected insert into full table");
                return Err(Error::TableFull {
                    table_size: self.table.len(),
                });
            }
        }
        Ok(())
    }

    ///Value stored for key, the probe's steps count towards `probe_total`
    pub fn get(&self, key: &str) -> Result<&V> {
        self.position(key)
            .and_then(|position| self.table[position].as_ref())
            .map(|(_, value)| value)
            .ok_or_else(|| Error::key_not_found(key))
    }
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        match self.position(key) {
            Some(position) => self.table[position]
                .as_mut()
                .map(|(_, value)| value)
                .ok_or_else(|| Error::key_not_found(key)),
            None => Err(Error::key_not_found(key)),
        }
    }
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }
    ///Occupied slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.table
            .iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl<V: fmt::Display, H: KeyHasher> fmt::Display for LinearProbeTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "({key}, {value})")?;
        }
        Ok(())
    }
}
