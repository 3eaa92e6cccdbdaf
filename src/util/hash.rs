use xxhash_rust::xxh3::xxh3_64;

/// Maps a string key to a start slot in a table of `table_size` slots.
pub trait KeyHasher {
    fn hash(&self, key: &str, table_size: usize) -> usize;
}

/// Adapter for plain functions and closures, e.g. a fixed lookup in tests.
#[derive(Clone, Copy)]
pub struct HashFn<F>(pub F);

impl<F: Fn(&str, usize) -> usize> KeyHasher for HashFn<F> {
    fn hash(&self, key: &str, table_size: usize) -> usize {
        (self.0)(key, table_size)
    }
}

const GOOD_HASH_SEED: u128 = 31415;
const GOOD_HASH_STEP: u128 = 27183;
const BAD_HASH_FACTOR: usize = 2;

/// Polynomial hash whose per-character multiplier keeps changing
/// (`a = a * 27183 mod (table_size - 1)`), so keys sharing a prefix still
/// spread across the table.
pub fn good_hash(key: &str, table_size: usize) -> usize {
    if table_size <= 1 {
        return 0;
    }
    let modulus = table_size as u128;
    let mut value: u128 = 0;
    let mut a = GOOD_HASH_SEED;
    for c in key.chars() {
        value = (c as u32 as u128 + a * value) % modulus;
        a = a * GOOD_HASH_STEP % (modulus - 1);
    }
    value as usize
}

/// Looks at the first character only; kept to compare against `good_hash`.
pub fn bad_hash(key: &str, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }
    key.chars()
        .next()
        .map_or(0, |c| c as usize * BAD_HASH_FACTOR % table_size)
}

pub fn xxh3_hash(key: &str, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }
    (xxh3_64(key.as_bytes()) % table_size as u64) as usize
}
