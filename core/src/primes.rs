use std::sync::OnceLock;

use crate::error::{GraphError, Result};

/// Upper bound of the process-wide sieve.
///
/// The hash range is `[0, MERSENNE_PRIME)`, so tables beyond this bound
/// would leave buckets permanently empty.
pub const DEFAULT_PRIME_BOUND: usize = 1 << 20;

static GLOBAL_PRIMES: OnceLock<PrimeTable> = OnceLock::new();

/// Ascending list of primes used to size hash tables.
#[derive(Debug, Clone)]
pub struct PrimeTable {
    primes: Vec<usize>,
}

impl PrimeTable {
    /// Sieve of Eratosthenes over `[2, bound]`.
    pub fn sieve(bound: usize) -> Self {
        if bound < 2 {
            return Self { primes: Vec::new() };
        }

        let mut is_prime = vec![true; bound + 1];
        is_prime[0] = false;
        is_prime[1] = false;

        let mut p = 2;
        while p * p <= bound {
            if is_prime[p] {
                let mut multiple = p * p;
                while multiple <= bound {
                    is_prime[multiple] = false;
                    multiple += p;
                }
            }
            p += 1;
        }

        let primes = is_prime
            .iter()
            .enumerate()
            .filter_map(|(n, &prime)| prime.then_some(n))
            .collect();
        Self { primes }
    }

    /// Shared table sieved once up to [`DEFAULT_PRIME_BOUND`].
    pub fn global() -> &'static PrimeTable {
        GLOBAL_PRIMES.get_or_init(|| Self::sieve(DEFAULT_PRIME_BOUND))
    }

    /// Smallest prime `>= n`, by binary search.
    ///
    /// Saturates at the largest prime in the table when `n` is beyond it.
    pub fn next_at_least(&self, n: usize) -> Result<usize> {
        let largest = *self
            .primes
            .last()
            .ok_or(GraphError::InvalidState("prime table is empty"))?;
        let idx = self.primes.partition_point(|&p| p < n);
        Ok(self.primes.get(idx).copied().unwrap_or(largest))
    }

    pub fn largest(&self) -> Option<usize> {
        self.primes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.primes
    }
}
