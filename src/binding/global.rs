//! Process-wide cache accessor.
//!
//! For hosts whose calling convention has nowhere to thread a [`HostCache`]
//! through. Prefer passing a handle explicitly where possible.

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::binding::HostCache;
use crate::config::Config;
use crate::error::{CacheError, Result};

static GLOBAL: OnceLock<HostCache> = OnceLock::new();

/// Builds the process-wide cache on the ambient tokio runtime.
///
/// Only the first successful call installs a cache; later calls fail with
/// [`CacheError::AlreadyInitialized`] and leave the installed one untouched.
pub fn init_global(config: &Config) -> Result<&'static HostCache> {
    if GLOBAL.get().is_some() {
        warn!("Global cache initialisation rejected: already initialized");
        return Err(CacheError::AlreadyInitialized);
    }

    let cache = HostCache::from_config(config)?;
    // A racing initialiser may have won; the losing cache is dropped and its
    // sweeper stops with it.
    GLOBAL.set(cache).map_err(|_| CacheError::AlreadyInitialized)?;
    info!("Global cache initialized");
    global().ok_or(CacheError::AlreadyInitialized)
}

/// Returns the process-wide cache, if it has been initialised.
pub fn global() -> Option<&'static HostCache> {
    GLOBAL.get()
}
