//! String-keyed cache facade for host applications.
//!
//! Hashes identifiers into [`OpaqueKey`]s, applies the [`Timeout`] policy and
//! stores JSON values. Each stored item keeps its original identifier so a
//! 128-bit hash collision reads as a miss instead of another key's value.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::runtime::Handle;
use tracing::debug;

use crate::binding::Timeout;
use crate::cache::{CacheEngine, CacheStats};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::hash::{KeyHasher, OpaqueKey, XxKeyHasher};

/// Value stored in the engine on behalf of a host.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub key: String,
    pub value: Value,
}

// == Host Cache ==
/// Cheaply cloneable handle; clones share one engine.
#[derive(Clone)]
pub struct HostCache {
    engine: Arc<CacheEngine<OpaqueKey, StoredItem>>,
    hasher: Arc<dyn KeyHasher>,
    default_ttl: u64,
}

impl HostCache {
    // == Constructors ==
    /// Creates a cache with the default hasher on the ambient tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        Ok(Self::with_hasher(config, &handle, Arc::new(XxKeyHasher)))
    }

    /// Creates a cache on `handle` using `hasher` for identifiers.
    pub fn with_hasher(config: &Config, handle: &Handle, hasher: Arc<dyn KeyHasher>) -> Self {
        Self::from_engine(
            Arc::new(CacheEngine::with_runtime(config, handle)),
            hasher,
            config.default_ttl,
        )
    }

    /// Wraps an existing engine.
    pub fn from_engine(
        engine: Arc<CacheEngine<OpaqueKey, StoredItem>>,
        hasher: Arc<dyn KeyHasher>,
        default_ttl: u64,
    ) -> Self {
        Self {
            engine,
            hasher,
            default_ttl,
        }
    }

    fn key_for(&self, key: &str) -> OpaqueKey {
        self.hasher.hash_key(key.as_bytes())
    }

    // == Set ==
    /// Stores `value` under `key` according to `timeout`.
    ///
    /// Returns whether the key was already present. `Timeout::Seconds(0)`
    /// stores nothing, leaves any existing entry as it is and returns `false`.
    pub fn set(&self, key: &str, value: Value, timeout: Timeout) -> bool {
        let Some(ttl) = timeout.resolve(self.default_ttl) else {
            debug!(key, "zero timeout, value not cached");
            return false;
        };

        let item = StoredItem {
            key: key.to_string(),
            value,
        };
        self.engine.set(self.key_for(key), item, ttl)
    }

    /// Stores `value` only if the slot for `key` holds no live value.
    ///
    /// Returns whether the value was stored. A live value stored under a
    /// colliding identifier also blocks the add.
    pub fn add(&self, key: &str, value: Value, timeout: Timeout) -> bool {
        let Some(ttl) = timeout.resolve(self.default_ttl) else {
            return false;
        };

        let item = StoredItem {
            key: key.to_string(),
            value,
        };
        self.engine.add(self.key_for(key), item, ttl)
    }

    pub fn set_many<I, S>(&self, items: I, timeout: Timeout)
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        for (key, value) in items {
            self.set(key.as_ref(), value, timeout);
        }
    }

    // == Get ==
    /// Returns the live value for `key`, or `default`.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.get_opt(key).unwrap_or(default)
    }

    /// Returns the live value for `key`, if any.
    ///
    /// A value stored under a colliding identifier reads as a miss and is
    /// counted as one.
    pub fn get_opt(&self, key: &str) -> Option<Value> {
        self.engine
            .lookup_if(&self.key_for(key), |item| item.key == key)
            .map(|item| item.value)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get_opt(key).is_some()
    }

    /// Returns the live values among `keys`; missing keys are left out.
    pub fn get_many<S: AsRef<str>>(&self, keys: &[S]) -> Map<String, Value> {
        keys.iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.get_opt(key).map(|value| (key.to_string(), value))
            })
            .collect()
    }

    // == Delete ==
    pub fn delete(&self, key: &str) {
        self.engine.remove(&self.key_for(key));
    }

    pub fn delete_many<S: AsRef<str>>(&self, keys: &[S]) {
        for key in keys {
            self.delete(key.as_ref());
        }
    }

    pub fn clear(&self) {
        self.engine.clear();
    }

    // == Probes ==
    pub fn stats(&self) -> CacheStats {
        self.engine.stats()
    }

    /// Physical entry count, dead entries awaiting a sweep included.
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn engine(&self) -> &CacheEngine<OpaqueKey, StoredItem> {
        &self.engine
    }

    /// Stops the shared engine's sweeper.
    pub async fn shutdown(&self) {
        self.engine.shutdown().await;
    }
}
