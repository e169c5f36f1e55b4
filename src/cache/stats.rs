//! Cache Statistics Module
//!
//! Counters describing reads, logical removals and sweeper activity.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a stored value
    pub hits: u64,
    /// Reads that fell back to the default (absent, expired or tombstoned)
    pub misses: u64,
    /// Removals that tombstoned an existing entry
    pub tombstones: u64,
    /// Entries physically erased by sweep passes
    pub swept: u64,
    /// Completed sweep passes
    pub sweeps: u64,
    /// Entries physically present, including dead ones awaiting a sweep
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_tombstone(&mut self) {
        self.tombstones += 1;
    }

    // == Record Sweep ==
    /// Counts one finished pass and the entries it erased.
    pub fn record_sweep(&mut self, erased: usize) {
        self.sweeps += 1;
        self.swept += erased as u64;
    }

    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.tombstones, 0);
        assert_eq!(stats.swept, 0);
        assert_eq!(stats.sweeps, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_sweep() {
        let mut stats = CacheStats::new();
        stats.record_sweep(3);
        stats.record_sweep(0);
        assert_eq!(stats.sweeps, 2);
        assert_eq!(stats.swept, 3);
    }
}
