//! Cache Engine Module
//!
//! Thread-safe front of the store. Every operation takes the single store
//! lock, does O(1) work and releases it; physical erasure is left to the
//! sweeper task started alongside the engine.
//!
//! # Latency
//! A sweep pass holds the lock for O(n) in the number of stored entries, once
//! per sweep interval. Callers arriving during a pass wait for it; this is the
//! dominant source of tail latency.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::debug;

use crate::cache::critical::release_in;
use crate::cache::{current_timestamp_ms, CacheStats, CacheStore, CriticalSection, NoCriticalSection};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweeper, Sweeper};

// == Shared State ==
/// State reachable from both the engine and its sweeper.
pub(crate) struct Shared<K, V> {
    store: Mutex<CacheStore<K, V>>,
    critical: Arc<dyn CriticalSection>,
}

impl<K, V> Shared<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(critical: Arc<dyn CriticalSection>) -> Self {
        Self {
            store: Mutex::new(CacheStore::new()),
            critical,
        }
    }

    /// One sweep pass: a single lock acquisition decides and erases, then the
    /// erased entries are destroyed after the lock is released.
    pub(crate) fn sweep(&self) -> usize {
        let erased = {
            let mut store = self.store.lock();
            store.sweep(current_timestamp_ms())
        };

        let count = erased.len();
        if count > 0 {
            release_in(self.critical.as_ref(), erased);
        }
        count
    }
}

// == Cache Engine ==
/// TTL cache over arbitrary keys and cloneable values.
///
/// Dropping the engine signals its sweeper to stop; use [`CacheEngine::shutdown`]
/// to also wait for it.
pub struct CacheEngine<K, V> {
    shared: Arc<Shared<K, V>>,
    sweeper: Mutex<Option<Sweeper>>,
    sweep_interval: Duration,
}

impl<K, V> CacheEngine<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructors ==
    /// Creates an engine whose sweeper runs on the ambient tokio runtime.
    ///
    /// Fails with [`CacheError::NoRuntime`] outside a runtime context.
    pub fn from_config(config: &Config) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        Ok(Self::with_runtime(config, &handle))
    }

    /// Creates an engine whose sweeper is spawned on `handle`.
    pub fn with_runtime(config: &Config, handle: &Handle) -> Self {
        Self::with_critical_section(config, handle, Arc::new(NoCriticalSection))
    }

    /// Creates an engine that destroys values inside `critical`.
    pub fn with_critical_section(
        config: &Config,
        handle: &Handle,
        critical: Arc<dyn CriticalSection>,
    ) -> Self {
        let shared = Arc::new(Shared::new(critical));
        let sweep_interval = config.sweep_interval();
        let sweeper = spawn_sweeper(shared.clone(), sweep_interval, handle);

        Self {
            shared,
            sweeper: Mutex::new(Some(sweeper)),
            sweep_interval,
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_secs` seconds (0 = forever).
    ///
    /// Returns `true` when the key was already present, including entries
    /// that were tombstoned or expired but not yet swept; those are revived.
    pub fn set(&self, key: K, value: V, ttl_secs: u64) -> bool {
        let displaced = {
            let mut store = self.shared.store.lock();
            store.set(key, value, ttl_secs, current_timestamp_ms())
        };

        match displaced {
            Some(old) => {
                release_in(self.shared.critical.as_ref(), old);
                true
            }
            None => false,
        }
    }

    /// Stores `value` only when `key` holds no live value, in one lock
    /// acquisition.
    ///
    /// Returns whether the value was stored. A dead entry awaiting a sweep
    /// does not block the add; its value is replaced.
    pub fn add(&self, key: K, value: V, ttl_secs: u64) -> bool {
        let outcome = {
            let mut store = self.shared.store.lock();
            store.add(key, value, ttl_secs, current_timestamp_ms())
        };

        match outcome {
            Ok(Some(old)) => {
                release_in(self.shared.critical.as_ref(), old);
                true
            }
            Ok(None) => true,
            Err(rejected) => {
                release_in(self.shared.critical.as_ref(), rejected);
                false
            }
        }
    }

    // == Get ==
    /// Returns a copy of the live value for `key`, or `default`.
    pub fn get<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).unwrap_or(default)
    }

    /// Returns a copy of the live value for `key`, if any.
    pub fn lookup<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut store = self.shared.store.lock();
        store.get(key, current_timestamp_ms()).cloned()
    }

    /// Returns a copy of the live value for `key` if `accept` admits it.
    ///
    /// A rejected value is counted as a miss.
    pub fn lookup_if<Q, F>(&self, key: &Q, accept: F) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> bool,
    {
        let mut store = self.shared.store.lock();
        store.get_if(key, current_timestamp_ms(), accept).cloned()
    }

    /// Whether `key` holds a live value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let store = self.shared.store.lock();
        store.contains_key(key, current_timestamp_ms())
    }

    // == Remove ==
    /// Tombstones `key`; the sweeper erases it later. No-op when absent.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.shared.store.lock().remove(key);
        if !found {
            debug!("remove on absent key ignored");
        }
    }

    // == Clear ==
    /// Drops every entry unconditionally.
    pub fn clear(&self) {
        let drained = self.shared.store.lock().clear();
        if !drained.is_empty() {
            debug!(entries = drained.len(), "cache cleared");
            release_in(self.shared.critical.as_ref(), drained);
        }
    }

    // == Sweep ==
    /// Runs one sweep pass now, on the calling thread.
    ///
    /// Returns the number of entries erased.
    pub fn sweep_now(&self) -> usize {
        self.shared.sweep()
    }

    // == Probes ==
    /// Physical entry count, dead entries awaiting a sweep included.
    pub fn len(&self) -> usize {
        self.shared.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.store.lock().is_empty()
    }

    /// Number of entries a reader could currently observe.
    pub fn live_len(&self) -> usize {
        self.shared.store.lock().live_len(current_timestamp_ms())
    }

    pub fn stats(&self) -> CacheStats {
        self.shared.store.lock().stats()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for it to exit. Later calls are no-ops.
    ///
    /// The cache stays usable; dead entries simply stop being erased.
    pub async fn shutdown(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
        }
    }

    /// Whether the background sweeper is still attached.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }
}
