use rand::{RngCore, SeedableRng};

use crate::error::{Error, Result};

//Linear congruential generator parameters, modulus 2^32 via wrapping u32 arithmetic
const MULTIPLIER: u32 = 134_775_813;
const INCREMENT: u32 = 1;

const DRAWS: usize = 5;
const KEPT_BITS: usize = 16;

/// Deterministic generator used by the trading simulation to pick indices.
///
/// `randint` combines five LCG outputs by a per-bit majority vote over their
/// upper 16 bits, so a given seed always replays the same picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomGen {
    seed: i64,
    state: u32,
}

impl RandomGen {
    pub fn new(seed: i64) -> Self {
        RandomGen {
            seed,
            //truncation keeps the seed's residue mod 2^32, negative seeds included
            state: seed as u32,
        }
    }
    pub fn seed(&self) -> i64 {
        self.seed
    }
    fn next_lcg(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    ///Random integer in 1..=k
    pub fn randint(&mut self, k: usize) -> Result<usize> {
        if k == 0 {
            return Err(Error::InvalidArgument("k must be a positive integer, got 0".to_string()));
        }

        let mut votes = [0usize; KEPT_BITS];
        for _ in 0..DRAWS {
            let draw = self.next_lcg() >> (32 - KEPT_BITS);
            for (bit, count) in votes.iter_mut().enumerate() {
                *count += (draw >> bit & 1) as usize;
            }
        }
        let number = votes
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > DRAWS / 2)
            .fold(0usize, |acc, (bit, _)| acc | 1 << bit);

        Ok(number % k + 1)
    }
}

impl RngCore for RandomGen {
    fn next_u32(&mut self) -> u32 {
        self.next_lcg()
    }
    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_lcg());
        let low = u64::from(self.next_lcg());
        high << 32 | low
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_lcg().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RandomGen {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}
