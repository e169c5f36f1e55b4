//! Cache Entry Module
//!
//! Defines the wrapper stored for every key: the payload plus the insertion
//! timestamp, TTL and logical-deletion flag that decide its liveness.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single stored value and its lifecycle metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion or last overwrite timestamp (Unix milliseconds)
    pub inserted_at_ms: u64,
    /// Time to live in seconds, 0 = never expires
    pub ttl_secs: u64,
    /// Set by `remove`; the entry is dead for readers until the sweeper erases it
    pub tombstoned: bool,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a live entry inserted at `now_ms`.
    pub fn new(value: V, ttl_secs: u64, now_ms: u64) -> Self {
        Self {
            value,
            inserted_at_ms: now_ms,
            ttl_secs,
            tombstoned: false,
        }
    }

    // == Overwrite ==
    /// Replaces value, timestamp and TTL in place and clears the tombstone.
    ///
    /// Returns the displaced value so the caller decides where it is dropped.
    pub fn overwrite(&mut self, value: V, ttl_secs: u64, now_ms: u64) -> V {
        self.inserted_at_ms = now_ms;
        self.ttl_secs = ttl_secs;
        self.tombstoned = false;
        std::mem::replace(&mut self.value, value)
    }

    // == Expiry ==
    /// Returns the Unix millisecond at which the TTL runs out, or `None` for
    /// entries that never expire.
    pub fn expires_at_ms(&self) -> Option<u64> {
        if self.ttl_secs == 0 {
            None
        } else {
            Some(
                self.inserted_at_ms
                    .saturating_add(self.ttl_secs.saturating_mul(1000)),
            )
        }
    }

    /// Checks the expiry predicate against an explicit clock reading.
    ///
    /// An entry is expired once it is tombstoned, or once `now_ms` reaches
    /// `inserted_at + ttl`. The boundary itself counts as expired.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        if self.tombstoned {
            return true;
        }
        match self.expires_at_ms() {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    /// Checks the expiry predicate against the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, `None` if the entry never expires.
    ///
    /// Tombstoned entries report `Some(0)`.
    pub fn ttl_remaining(&self) -> Option<u64> {
        if self.tombstoned {
            return Some(0);
        }
        self.expires_at_ms()
            .map(|expires| expires.saturating_sub(current_timestamp_ms()) / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0 rather than failing.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
