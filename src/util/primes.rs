use crate::error::{Error, Result};

///Largest backing array a probing table is sized to by default
pub const MAX_TABLE_SIZE: usize = 100_000;

/// Largest prime not exceeding `k`, found with a sieve of Eratosthenes.
pub fn largest_prime(k: usize) -> Result<usize> {
    if !(2..=MAX_TABLE_SIZE).contains(&k) {
        return Err(Error::InvalidArgument(format!(
            "k must be between 2 and {MAX_TABLE_SIZE}, got {k}"
        )));
    }

    let mut is_prime = vec![true; k + 1];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2;
    while i * i <= k {
        if is_prime[i] {
            for multiple in (i * i..=k).step_by(i) {
                is_prime[multiple] = false;
            }
        }
        i += 1;
    }

    //2 is always in range, so the search cannot come up empty
    Ok((2..=k).rev().find(|&n| is_prime[n]).unwrap_or(2))
}
