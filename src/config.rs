use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::util::hash::{bad_hash, good_hash, xxh3_hash, KeyHasher};
use crate::util::primes::{largest_prime, MAX_TABLE_SIZE};

/// Hash function used by a [`LinearProbeTable`](crate::LinearProbeTable).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashVariant {
    #[default]
    Good,
    Bad,
    Xxh3,
}

impl KeyHasher for HashVariant {
    fn hash(&self, key: &str, table_size: usize) -> usize {
        match self {
            HashVariant::Good => good_hash(key, table_size),
            HashVariant::Bad => bad_hash(key, table_size),
            HashVariant::Xxh3 => xxh3_hash(key, table_size),
        }
    }
}

/// Construction parameters for a probing table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub expected_entry_count: usize,
    pub hash_variant: HashVariant,
    pub table_size_override: Option<usize>, //exact backing array size, skips prime sizing
}

impl TableConfig {
    pub fn new(expected_entry_count: usize) -> Self {
        Self {
            expected_entry_count,
            hash_variant: HashVariant::default(),
            table_size_override: None,
        }
    }
    pub fn set_hash_variant(mut self, hash_variant: HashVariant) -> Self {
        self.hash_variant = hash_variant;
        self
    }
    pub fn set_table_size_override(mut self, table_size: usize) -> Self {
        self.table_size_override = Some(table_size);
        self
    }

    /// Backing array size: the override when given, otherwise the largest
    /// prime not exceeding twice the expected entry count (capped at
    /// [`MAX_TABLE_SIZE`]).
    pub fn table_size(&self) -> Result<usize> {
        let expected = self.expected_entry_count;
        if let Some(table_size) = self.table_size_override {
            if table_size == 0 || table_size < expected {
                return Err(Error::InvalidArgument(format!(
                    "table size override {table_size} cannot hold {expected} entries"
                )));
            }
            return Ok(table_size);
        }

        if expected == 0 {
            return Err(Error::InvalidArgument(
                "expected entry count must be positive".to_string(),
            ));
        }
        let table_size = largest_prime(expected.saturating_mul(2).min(MAX_TABLE_SIZE))?;
        if table_size < expected {
            return Err(Error::InvalidArgument(format!(
                "{expected} entries exceed the largest default table size {table_size}, use an override"
            )));
        }
        debug!(expected, table_size, "sized table by largest prime");
        Ok(table_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizing() {
        assert_eq!(TableConfig::new(24).table_size(), Ok(47));
        assert_eq!(TableConfig::new(100).table_size(), Ok(199));
        assert_eq!(TableConfig::new(1).table_size(), Ok(2));
        assert_eq!(TableConfig::new(90_000).table_size(), Ok(99991));
    }

    #[test]
    fn test_override() {
        let config = TableConfig::new(100).set_table_size_override(120);
        assert_eq!(config.table_size(), Ok(120));
        let config = TableConfig::new(10).set_table_size_override(10);
        assert_eq!(config.table_size(), Ok(10));
    }

    #[test]
    fn test_invalid_sizes() {
        let too_small = TableConfig::new(100).set_table_size_override(99);
        assert!(matches!(too_small.table_size(), Err(Error::InvalidArgument(_))));
        let empty = TableConfig::new(0).set_table_size_override(0);
        assert!(matches!(empty.table_size(), Err(Error::InvalidArgument(_))));
        assert!(matches!(TableConfig::new(0).table_size(), Err(Error::InvalidArgument(_))));
        assert!(matches!(TableConfig::new(100_000).table_size(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_builder_and_serde() {
        let config = TableConfig::new(5)
            .set_hash_variant(HashVariant::Xxh3)
            .set_table_size_override(11);
        let bytes = bincode::serialize(&config).unwrap();
        let decoded: TableConfig = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(decoded.hash_variant, HashVariant::Xxh3);
    }

    #[test]
    fn test_variant_dispatch() {
        assert_eq!(HashVariant::Good.hash("hello", 47), 46);
        assert_eq!(HashVariant::Bad.hash("hello", 47), 20);
        assert!(HashVariant::Xxh3.hash("hello", 47) < 47);
    }
}
