//! Separate-chaining hash index with universal hashing and prime-sized tables.
//!
//! The graph engine keeps two of these (vertex id → position and
//! edge id → position) and the traversals use one as a visited set.
//! Load is held between 1/8 and 1/2: an insert that brings `2·len` up to the
//! bucket count doubles the table, and a remove that drops `8·len` below it
//! halves the table. Both round the target up to the next prime and rehash
//! every entry; order within a bucket is not preserved.

use std::borrow::Borrow;
use std::fmt;

use crate::hash::UniversalHash;
use crate::primes::PrimeTable;

/// Bucket count of a freshly constructed index.
pub const INITIAL_CAPACITY: usize = 3;

pub struct HashIndex<K, V> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    primes: &'static PrimeTable,
}

impl<K: UniversalHash, V> HashIndex<K, V> {
    pub fn new() -> Self {
        Self::with_buckets(INITIAL_CAPACITY)
    }

    /// Index whose bucket count is the smallest prime `>= capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let primes = PrimeTable::global();
        let buckets = primes
            .next_at_least(capacity.max(INITIAL_CAPACITY))
            .unwrap_or(INITIAL_CAPACITY);
        Self::with_buckets(buckets)
    }

    fn with_buckets(count: usize) -> Self {
        Self {
            buckets: empty_buckets(count),
            len: 0,
            primes: PrimeTable::global(),
        }
    }

    /// Inserts `key → value`. Returns false, leaving the index untouched,
    /// if the key is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.contains(&key) {
            return false;
        }

        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket].push((key, value));
        self.len += 1;

        if 2 * self.len >= self.buckets.len() {
            self.resize(2 * self.buckets.len());
        }
        true
    }

    /// Removes every entry matching `key`. Returns true if any existed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: UniversalHash + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        let chain = &mut self.buckets[bucket];
        let before = chain.len();
        chain.retain(|(k, _)| !key_matches(k, key));
        let removed = before - chain.len();

        if removed == 0 {
            return false;
        }
        self.len -= removed;

        if 8 * self.len < self.buckets.len() {
            self.resize(self.buckets.len() / 2);
        }
        true
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: UniversalHash + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket]
            .iter()
            .find(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: UniversalHash + ?Sized,
    {
        let bucket = key.bucket(self.buckets.len());
        self.buckets[bucket]
            .iter_mut()
            .find(|(k, _)| key_matches(k, key))
            .map(|(_, v)| v)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: UniversalHash + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Entries bucket by bucket. Order is unspecified and changes on resize.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (k, v)))
    }

    /// All keys, unordered.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Drops every entry and returns to the initial bucket count.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(INITIAL_CAPACITY);
        self.len = 0;
    }

    /// Longest chain length, for diagnostics.
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn resize(&mut self, target: usize) {
        let new_size = match self.primes.next_at_least(target) {
            Ok(size) => size,
            Err(err) => {
                tracing::warn!(error = %err, target, "hash index resize skipped");
                return;
            }
        };
        if new_size == self.buckets.len() {
            return;
        }
        if new_size < target && target > self.buckets.len() {
            tracing::warn!(
                target,
                capacity = new_size,
                len = self.len,
                "hash index capacity saturated at largest precomputed prime"
            );
        }

        tracing::trace!(from = self.buckets.len(), to = new_size, len = self.len, "rehash");
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_size));
        for (key, value) in old.into_iter().flatten() {
            let bucket = key.bucket(new_size);
            self.buckets[bucket].push((key, value));
        }
    }
}

#[inline]
fn key_matches<K, Q>(stored: &K, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    stored.borrow() == key
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    std::iter::repeat_with(Vec::new).take(count).collect()
}

impl<K: UniversalHash, V> Default for HashIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for HashIndex<K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            primes: self.primes,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|(k, v)| (k, v)))
            .finish()
    }
}
