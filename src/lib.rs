//! Sweepcache - an embeddable thread-safe TTL cache
//!
//! Entries expire by TTL or explicit removal and are hidden from readers
//! immediately; a background sweeper erases them physically once per interval.

pub mod api;
pub mod binding;
pub mod cache;
pub mod config;
pub mod error;
pub mod hash;
pub mod models;
mod tasks;

pub use api::AppState;
pub use binding::{HostCache, Timeout};
pub use cache::CacheEngine;
pub use config::Config;
pub use error::{CacheError, Result};
pub use hash::{KeyHasher, OpaqueKey, XxKeyHasher};
