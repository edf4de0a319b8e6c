//! Bridge between the alias collection and persistent storage.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::{Alias, RecordSet, Storage, StoreError, SyncedCache};

/// Well-known storage key for the persisted alias collection.
pub const ALIAS_DATA_KEY: &str = "aliases";

/// Owner of the alias collection and its single writer path to storage.
///
/// The collection is read from storage at most once per process activation;
/// the synchronized cache collapses concurrent first accesses into one read.
/// Every subsequent [`AliasContext::fetch`] is a cheap in-memory handle.
pub struct AliasContext {
    storage: Arc<dyn Storage>,
    cache: SyncedCache<Arc<RwLock<Vec<Alias>>>, StoreError>,
}

impl AliasContext {
    /// A context that starts from an empty collection when storage holds
    /// no value under [`ALIAS_DATA_KEY`].
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_seed(storage, Vec::new())
    }

    /// A context that substitutes `seed` when storage holds no value.
    /// The seed is only persisted once a commit happens.
    pub fn with_seed(storage: Arc<dyn Storage>, seed: Vec<Alias>) -> Self {
        let cache = SyncedCache::new({
            let storage = storage.clone();
            move || {
                let storage = storage.clone();
                let seed = seed.clone();
                async move {
                    let aliases: Vec<Alias> = match storage.get(ALIAS_DATA_KEY).await? {
                        Some(value) => serde_json::from_value(value)?,
                        None => seed,
                    };
                    debug!(count = aliases.len(), "loaded alias collection");
                    Ok(Arc::new(RwLock::new(aliases)))
                }
            }
        });
        Self { storage, cache }
    }

    /// A view over the cached alias collection, loading it from storage on
    /// first access.
    pub async fn fetch(&self) -> Result<RecordSet<Alias>, StoreError> {
        Ok(RecordSet::new(self.cache.value().await?))
    }

    /// Write the current in-memory collection back to storage. Mutations
    /// are lost on process teardown unless this runs after them.
    pub async fn commit(&self) -> Result<(), StoreError> {
        let records = self.cache.value().await?;
        let aliases = records.read().await.clone();
        let count = aliases.len();
        self.storage
            .set(ALIAS_DATA_KEY, serde_json::to_value(aliases)?)
            .await?;
        debug!(count, "committed alias collection");
        Ok(())
    }

    /// Drop the in-memory cache without touching persisted data. The next
    /// fetch re-reads from storage.
    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    /// Whether the collection is currently cached in memory.
    pub fn is_loaded(&self) -> bool {
        self.cache.is_initialized()
    }
}
