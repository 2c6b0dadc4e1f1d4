//! In-process key-value store with fault injection.

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError, StorageOp};

/// Map-backed store. Clones share the same underlying map and fault flags,
/// so a test can keep a handle while the session store owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    slots: RwLock<HashMap<String, String>>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_delete: AtomicBool,
    /// Single operations on single keys that fail regardless of the flags above.
    failing_keys: Mutex<HashSet<(StorageOp, String)>>,
    read_delay_ms: AtomicU64,
    write_delay_ms: AtomicU64,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let slots = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { inner: Arc::new(Inner { slots: RwLock::new(slots), ..Inner::default() }) }
    }

    /// Make every `get` fail while `fail` is true.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Make every `set` fail while `fail` is true.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Make every `delete` fail while `fail` is true.
    pub fn fail_deletes(&self, fail: bool) {
        self.inner.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Make `op` fail for `key` only, until [`restore_key`](Self::restore_key).
    pub fn fail_key(&self, op: StorageOp, key: &str) {
        self.lock_failing_keys().insert((op, key.to_owned()));
    }

    pub fn restore_key(&self, op: StorageOp, key: &str) {
        self.lock_failing_keys().remove(&(op, key.to_owned()));
    }

    /// Delay each `get` by `delay` before it reads.
    pub fn set_read_delay(&self, delay: Duration) {
        self.inner.read_delay_ms.store(as_millis(delay), Ordering::SeqCst);
    }

    /// Delay each `set` and `delete` by `delay` before it applies.
    pub fn set_write_delay(&self, delay: Duration) {
        self.inner.write_delay_ms.store(as_millis(delay), Ordering::SeqCst);
    }

    /// Snapshot of a slot, bypassing fault injection.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.slots.read().await.get(key).cloned()
    }

    fn check(&self, op: StorageOp, key: &str) -> Result<(), StorageError> {
        let all = match op {
            StorageOp::Get => &self.inner.fail_get,
            StorageOp::Set => &self.inner.fail_set,
            StorageOp::Delete => &self.inner.fail_delete,
        };
        let failing = all.load(Ordering::SeqCst) || self.lock_failing_keys().contains(&(op, key.to_owned()));
        if failing {
            return Err(StorageError::Unavailable { op, key: key.to_owned() });
        }
        Ok(())
    }

    fn lock_failing_keys(&self) -> MutexGuard<'_, HashSet<(StorageOp, String)>> {
        self.inner.failing_keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn as_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

async fn pause(delay_ms: &AtomicU64) {
    let ms = delay_ms.load(Ordering::SeqCst);
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        pause(&self.inner.read_delay_ms).await;
        self.check(StorageOp::Get, key)?;
        Ok(self.inner.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        pause(&self.inner.write_delay_ms).await;
        self.check(StorageOp::Set, key)?;
        self.inner
            .slots
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        pause(&self.inner.write_delay_ms).await;
        self.check(StorageOp::Delete, key)?;
        self.inner.slots.write().await.remove(key);
        Ok(())
    }
}
