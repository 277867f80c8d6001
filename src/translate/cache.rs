//! In-memory translation cache with debounced persistence.
//!
//! The map in memory is authoritative for the session. Inserts schedule
//! one write to the store after `CACHE_PERSIST_INTERVAL`; further inserts
//! inside that window ride along with the same write. `flush` writes
//! immediately, and dropping the last handle flushes anything pending.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use crate::config;
use crate::db::{self, Bucket, DbPool, LogOnError};
use crate::error::StoreError;

#[derive(Clone)]
pub struct TranslationCache {
  inner: Arc<CacheInner>,
}

struct CacheInner {
  entries: Mutex<HashMap<String, String>>,
  store: Option<DbPool>,
  interval: Duration,
  /// Entries changed since the last write
  dirty: AtomicBool,
  /// A persist task is pending
  scheduled: AtomicBool,
}

impl TranslationCache {
  /// Cache backed by the store, seeded with what it already holds
  pub fn load(store: DbPool) -> Self {
    Self::load_with_interval(store, config::CACHE_PERSIST_INTERVAL)
  }

  pub fn load_with_interval(store: DbPool, interval: Duration) -> Self {
    let entries: HashMap<String, String> = db::try_lock(&store)
      .map(|conn| db::read_bucket(&conn, Bucket::TranslationCache))
      .log_warn_default("Failed to load translation cache");
    tracing::debug!("Loaded {} cached translations", entries.len());
    Self::build(entries, Some(store), interval)
  }

  /// Cache that never touches durable storage
  pub fn in_memory() -> Self {
    Self::build(HashMap::new(), None, config::CACHE_PERSIST_INTERVAL)
  }

  fn build(entries: HashMap<String, String>, store: Option<DbPool>, interval: Duration) -> Self {
    Self {
      inner: Arc::new(CacheInner {
        entries: Mutex::new(entries),
        store,
        interval,
        dirty: AtomicBool::new(false),
        scheduled: AtomicBool::new(false),
      }),
    }
  }

  pub fn get(&self, text: &str) -> Option<String> {
    self.inner.entries().ok()?.get(text).cloned()
  }

  pub fn contains(&self, text: &str) -> bool {
    self.get(text).is_some()
  }

  pub fn len(&self) -> usize {
    self.inner.entries().map(|e| e.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Store a translation and schedule a write to the store
  pub fn insert(&self, text: &str, translated: &str) {
    let Ok(mut entries) = self.inner.entries() else {
      return;
    };
    entries.insert(text.to_string(), translated.to_string());
    drop(entries);

    self.inner.dirty.store(true, Ordering::SeqCst);
    self.schedule_persist();
  }

  /// Write pending entries to the store now
  pub fn flush(&self) -> Result<(), StoreError> {
    self.inner.persist()
  }

  fn schedule_persist(&self) {
    if self.inner.store.is_none() || self.inner.scheduled.swap(true, Ordering::SeqCst) {
      return;
    }

    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
      // No runtime to run the timer on; write through instead
      self.inner.scheduled.store(false, Ordering::SeqCst);
      let _ = self.inner.persist().log_warn("Failed to persist translation cache");
      return;
    };

    let weak: Weak<CacheInner> = Arc::downgrade(&self.inner);
    let interval = self.inner.interval;
    runtime.spawn(async move {
      tokio::time::sleep(interval).await;
      // Dropped caches flush themselves
      if let Some(inner) = weak.upgrade() {
        inner.scheduled.store(false, Ordering::SeqCst);
        let _ = inner.persist().log_warn("Failed to persist translation cache");
      }
    });
  }
}

impl CacheInner {
  fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
    self.entries.lock().map_err(|_| StoreError::LockPoisoned)
  }

  fn persist(&self) -> Result<(), StoreError> {
    let Some(store) = &self.store else {
      return Ok(());
    };
    if !self.dirty.load(Ordering::SeqCst) {
      return Ok(());
    }

    // Store lock first so concurrent flushes write snapshots in order
    let conn = db::try_lock(store)?;
    // Clear before snapshotting: an insert landing after this point
    // re-marks the cache dirty instead of being lost
    if !self.dirty.swap(false, Ordering::SeqCst) {
      return Ok(());
    }

    let result = self.entries().map(|entries| entries.clone()).and_then(|snapshot| {
      db::kv::try_write_bucket(&conn, Bucket::TranslationCache, &snapshot)?;
      tracing::debug!("Persisted {} cached translations", snapshot.len());
      Ok(())
    });
    if result.is_err() {
      self.dirty.store(true, Ordering::SeqCst);
    }
    result
  }
}

impl Drop for CacheInner {
  fn drop(&mut self) {
    let _ = self.persist().log_warn("Failed to flush translation cache");
  }
}
