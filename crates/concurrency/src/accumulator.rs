//! Sharded concurrent accumulator
//!
//! Parallel ranking fans query terms out across worker threads, and every
//! worker adds `tf * idf` into a running total per document. Instead of a
//! single lock around one map, the key space is split into a fixed number
//! of shards, each an independent `FxHashMap` behind its own mutex.
//!
//! # Design
//!
//! - Shard for a key = `FxHash(key) % shard_count`, fixed at construction
//! - A shard lock is held for one read-modify-write and never across shards,
//!   so workers touching different shards never contend
//! - `consolidate` takes `self` by value: workers only ever hold
//!   `&ConcurrentAccumulator`, so every writer has been joined before the
//!   merge can run

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHasher};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::ops::AddAssign;

/// Key -> running total map, safe for concurrent increment and erase
///
/// # Thread Safety
///
/// All methods except `consolidate` take `&self` and may be called from
/// any number of threads at once, on the same or different keys.
#[derive(Debug)]
pub struct ConcurrentAccumulator<K, V> {
    shards: Vec<Mutex<FxHashMap<K, V>>>,
}

impl<K, V> ConcurrentAccumulator<K, V>
where
    K: Hash + Eq + Ord + Copy,
    V: AddAssign + Default + Copy,
{
    /// Create an empty accumulator with `shard_count` shards
    ///
    /// A shard count of zero is treated as one.
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count)
            .map(|_| Mutex::new(FxHashMap::default()))
            .collect();
        Self { shards }
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard that owns `key`
    #[inline]
    pub fn shard_index(&self, key: &K) -> usize {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Apply `f` to the value for `key` under its shard lock
    ///
    /// The entry is created with `V::default()` if absent.
    pub fn update<F>(&self, key: K, f: F)
    where
        F: FnOnce(&mut V),
    {
        let mut shard = self.shards[self.shard_index(&key)].lock();
        f(shard.entry(key).or_default());
    }

    /// Add `delta` to the running total for `key`
    #[inline]
    pub fn increment(&self, key: K, delta: V) {
        self.update(key, |value| *value += delta);
    }

    /// Remove the entry for `key`, returning its total if it was present
    pub fn erase(&self, key: &K) -> Option<V> {
        self.shards[self.shard_index(key)].lock().remove(key)
    }

    /// Current total for `key`
    pub fn get(&self, key: &K) -> Option<V> {
        self.shards[self.shard_index(key)].lock().get(key).copied()
    }

    /// Number of entries across all shards
    ///
    /// Shards are visited one at a time, so the count is only exact when
    /// no writer is active.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Check whether every shard is empty
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Merge all shards into one ordered map
    pub fn consolidate(self) -> BTreeMap<K, V> {
        self.shards
            .into_iter()
            .flat_map(|shard| shard.into_inner())
            .collect()
    }
}

impl<K, V> Default for ConcurrentAccumulator<K, V>
where
    K: Hash + Eq + Ord + Copy,
    V: AddAssign + Default + Copy,
{
    fn default() -> Self {
        Self::new(100)
    }
}
