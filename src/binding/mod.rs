//! Host Binding Module
//!
//! Adapts the generic engine to host applications: string identifiers, JSON
//! values and host timeout conventions.

pub mod global;
mod host;
mod timeout;

pub use global::{global, init_global};
pub use host::{HostCache, StoredItem};
pub use timeout::Timeout;
