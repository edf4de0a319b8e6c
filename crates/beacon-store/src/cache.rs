//! Synchronized single-slot lazy cache.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};

/// Boxed async initializer for a cache slot.
pub type Initializer<T, E> =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> + Send + Sync>;

/// A cache of a single value with an asynchronous initializer.
///
/// Calls to the initializer are synchronized so that concurrent readers
/// join one in-flight initialization instead of each running their own.
/// `T` is expected to be a cheap handle (e.g. `Arc<RwLock<Vec<Alias>>>`);
/// every caller of [`SyncedCache::value`] observes a clone of the same
/// initialized value.
pub struct SyncedCache<T, E> {
    slot: RwLock<Option<T>>,
    // Serializes initialization and clearing. Tokio mutexes queue waiters
    // in arrival order, so entries into the critical section are fair.
    sync: Mutex<()>,
    initialized: AtomicBool,
    init: Initializer<T, E>,
}

impl<T: Clone, E> SyncedCache<T, E> {
    /// Create a cache around an async initializer. The initializer is not
    /// run until the first call to [`SyncedCache::value`].
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            slot: RwLock::new(None),
            sync: Mutex::new(()),
            initialized: AtomicBool::new(false),
            init: Box::new(move || Box::pin(init())),
        }
    }

    /// Whether a value is currently cached. Never blocks.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// The cached value, initializing it first if necessary.
    ///
    /// If the initializer fails, the error propagates to the caller that
    /// triggered this attempt and the slot stays empty; queued callers
    /// retry initialization rather than observing a stale failure.
    pub async fn value(&self) -> Result<T, E> {
        if let Some(value) = self.slot.read().await.as_ref() {
            return Ok(value.clone());
        }
        let _entry = self.sync.lock().await;
        // A caller that raced us may have filled the slot while we queued
        if let Some(value) = self.slot.read().await.as_ref() {
            return Ok(value.clone());
        }
        let value = (self.init)().await?;
        *self.slot.write().await = Some(value.clone());
        self.initialized.store(true, Ordering::SeqCst);
        Ok(value)
    }

    /// Empty the slot, waiting out any in-flight initialization first.
    /// The next call to [`SyncedCache::value`] re-runs the initializer.
    pub async fn clear(&self) {
        let _entry = self.sync.lock().await;
        *self.slot.write().await = None;
        self.initialized.store(false, Ordering::SeqCst);
    }
}
