//! Cache Store Module
//!
//! The unsynchronised mapping from key to entry. Every method takes the
//! current time explicitly; locking and clock reads belong to the engine.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry mapping plus counters.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Operation counters
    stats: CacheStats,
}

impl<K, V> Default for CacheStore<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Inserts or overwrites `key`.
    ///
    /// An existing entry, live or not, is updated in place and its previous
    /// value is handed back. `None` means the key was absent.
    pub fn set(&mut self, key: K, value: V, ttl_secs: u64, now_ms: u64) -> Option<V> {
        let displaced = match self.entries.get_mut(&key) {
            Some(entry) => Some(entry.overwrite(value, ttl_secs, now_ms)),
            None => {
                self.entries
                    .insert(key, CacheEntry::new(value, ttl_secs, now_ms));
                None
            }
        };
        self.stats.set_total_entries(self.entries.len());
        displaced
    }

    /// Stores `value` only when `key` has no live entry.
    ///
    /// `Ok` carries the dead value that was replaced, if any. `Err` hands
    /// `value` back untouched because a live entry occupies the key.
    pub fn add(&mut self, key: K, value: V, ttl_secs: u64, now_ms: u64) -> Result<Option<V>, V> {
        if self.contains_key(&key, now_ms) {
            return Err(value);
        }
        Ok(self.set(key, value, ttl_secs, now_ms))
    }

    // == Get ==
    /// Returns the value for `key` if it is present and not expired at `now_ms`.
    ///
    /// Records a hit or a miss; entries themselves are never touched.
    pub fn get<Q>(&mut self, key: &Q, now_ms: u64) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_if(key, now_ms, |_| true)
    }

    /// Like [`CacheStore::get`], but a live value rejected by `accept` reads
    /// as a miss and is counted as one.
    pub fn get_if<Q, F>(&mut self, key: &Q, now_ms: u64, accept: F) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> bool,
    {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms) && accept(&entry.value) => {
                self.stats.record_hit();
                Some(&entry.value)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Liveness check without touching the counters.
    pub fn contains_key<Q>(&self, key: &Q, now_ms: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now_ms))
    }

    // == Remove ==
    /// Tombstones `key`. The entry stays physically present until swept.
    ///
    /// Returns whether an entry was found.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_mut(key) {
            Some(entry) => {
                if !entry.tombstoned {
                    entry.tombstoned = true;
                    self.stats.record_tombstone();
                }
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Takes every entry out of the store, leaving it empty.
    pub fn clear(&mut self) -> HashMap<K, CacheEntry<V>> {
        let drained = std::mem::take(&mut self.entries);
        self.stats.set_total_entries(0);
        drained
    }

    // == Sweep ==
    /// Moves every entry expired at `now_ms` out of the store.
    ///
    /// The liveness decision and the erase happen within this single call, so
    /// the caller holding the store lock across it cannot lose a fresh `set`.
    pub fn sweep(&mut self, now_ms: u64) -> Vec<CacheEntry<V>> {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now_ms))
            .map(|(key, _)| key.clone())
            .collect();

        let erased: Vec<CacheEntry<V>> = expired_keys
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .collect();

        self.stats.record_sweep(erased.len());
        self.stats.set_total_entries(self.entries.len());
        erased
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Physical entry count, dead entries awaiting a sweep included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries a reader could still observe at `now_ms`.
    pub fn live_len(&self, now_ms: u64) -> usize {
        self.entries
            .values()
            .filter(|entry| !entry.is_expired_at(now_ms))
            .count()
    }
}
