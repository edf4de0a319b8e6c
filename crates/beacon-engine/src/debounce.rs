//! Debounced batching of partial alias updates.
//!
//! UI surfaces emit an update per keystroke while a field is being edited.
//! Sending each one through the controller would thrash storage, so updates
//! are merged per record id (latest write wins per field) and released only
//! after a quiet period with no further edits to that record.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use beacon_store::AliasUpdate;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

struct Pending {
    generation: u64,
    update: AliasUpdate,
}

/// Coalesces rapid partial updates to the same alias into one.
///
/// Each [`UpdateDebouncer::push`] merges into the pending update for that id
/// and reschedules its timer; when the quiet window elapses the merged
/// update is delivered on the channel handed out at construction.
pub struct UpdateDebouncer {
    window: Duration,
    pending: Arc<Mutex<HashMap<String, Pending>>>,
    generations: Arc<AtomicU64>,
    out: mpsc::Sender<AliasUpdate>,
}

impl UpdateDebouncer {
    /// Create a debouncer and the receiver its merged updates arrive on.
    pub fn new(window: Duration) -> (Self, mpsc::Receiver<AliasUpdate>) {
        let (out, rx) = mpsc::channel(64);
        let debouncer = Self {
            window,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generations: Arc::new(AtomicU64::new(0)),
            out,
        };
        (debouncer, rx)
    }

    /// Merge `update` into the pending update for its id and restart that
    /// id's quiet-window timer.
    pub async fn push(&self, update: AliasUpdate) {
        let id = update.id.clone();
        // Generations are unique across all pushes, so a timer can tell
        // whether its entry was superseded or flushed while it slept
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut pending = self.pending.lock().await;
            match pending.get_mut(&id) {
                Some(entry) => {
                    entry.update.merge(update);
                    entry.generation = generation;
                }
                None => {
                    pending.insert(id.clone(), Pending { generation, update });
                }
            }
        }

        let window = self.window;
        let pending = self.pending.clone();
        let out = self.out.clone();
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let merged = {
                let mut pending = pending.lock().await;
                match pending.get(&id) {
                    Some(entry) if entry.generation == generation => {
                        pending.remove(&id).map(|entry| entry.update)
                    }
                    // Superseded by a later push; its timer will deliver
                    _ => None,
                }
            };
            if let Some(update) = merged {
                debug!(id = %update.id, "flushing debounced update");
                let _ = out.send(update).await;
            }
        });
    }

    /// Deliver every pending update immediately, regardless of timers.
    pub async fn flush_all(&self) {
        let drained: Vec<AliasUpdate> = {
            let mut pending = self.pending.lock().await;
            pending.drain().map(|(_, entry)| entry.update).collect()
        };
        for update in drained {
            let _ = self.out.send(update).await;
        }
    }

    /// Number of record ids with an update waiting to be delivered.
    pub async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }
}
