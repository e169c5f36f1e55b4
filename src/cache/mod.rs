//! Cache Module
//!
//! The embeddable TTL cache: entries, the unsynchronised store, the locked
//! engine and the seam for host-controlled value destruction.

mod critical;
mod engine;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use critical::{CriticalSection, NoCriticalSection};
pub use engine::CacheEngine;
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::CacheStore;

pub(crate) use engine::Shared;
