pub mod hash;
pub mod primes;
pub mod random_gen;
