//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::CacheStats;

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Whether the key already had an entry
    pub was_present: bool,
    /// False when a zero TTL skipped caching
    pub stored: bool,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, was_present: bool, stored: bool) -> Self {
        let key = key.into();
        let message = if stored {
            format!("Key '{}' set successfully", key)
        } else {
            format!("Key '{}' not cached (zero TTL)", key)
        };
        Self {
            message,
            key,
            was_present,
            stored,
        }
    }
}

/// Response body for POST /add
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    pub key: String,
    pub added: bool,
}

/// Response body for POST /get_many
#[derive(Debug, Clone, Serialize)]
pub struct GetManyResponse {
    /// Live keys and their values; missing keys are omitted
    pub values: Map<String, Value>,
}

/// Response body for DELETE /del/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for POST /delete_many
#[derive(Debug, Clone, Serialize)]
pub struct DeleteManyResponse {
    /// Number of keys submitted for deletion
    pub deleted: usize,
}

/// Response body for DELETE /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of keys tombstoned by deletes
    pub tombstones: u64,
    /// Number of entries erased by the sweeper
    pub swept: u64,
    /// Number of completed sweep passes
    pub sweeps: u64,
    /// Entries physically in the cache, including ones awaiting a sweep
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            tombstones: stats.tombstones,
            swept: stats.swept,
            sweeps: stats.sweeps,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the background sweeper is running
    pub sweeper_running: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(sweeper_running: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            sweeper_running,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
