//! Cache manager.

use super::key::ClientKey;
use crate::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that ran the constructor (successfully or not).
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Get-or-create map of constructed clients.
///
/// The lock is held across lookup, construction and insert. Construction is
/// local (no network handshake), so the critical section stays short, and two
/// callers racing on the same key can never both run the constructor.
pub struct ClientCache<C> {
    entries: Mutex<HashMap<ClientKey, Arc<C>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<C> ClientCache<C> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the client stored under `key`, or build one with `construct`,
    /// store it and return it. A failing `construct` leaves the cache untouched.
    pub fn get_or_try_insert_with<F>(&self, key: ClientKey, construct: F) -> Result<Arc<C>>
    where
        F: FnOnce(&ClientKey) -> Result<C>,
    {
        let mut entries = self.lock();
        if let Some(client) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(client));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let client = Arc::new(construct(&key)?);
        tracing::debug!(client = %key, "constructed backend client");
        entries.insert(key, Arc::clone(&client));
        Ok(client)
    }

    pub fn contains(&self, key: &ClientKey) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    // A panic inside a constructor cannot leave a half-inserted entry, so a
    // poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<ClientKey, Arc<C>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C> Default for ClientCache<C> {
    fn default() -> Self {
        Self::new()
    }
}
