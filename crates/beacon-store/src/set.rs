//! Shared in-memory record collection.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A mutable view over a shared, ordered sequence of records.
///
/// Cloning a `RecordSet` yields another view of the same live collection.
/// Uniqueness and validation are not enforced at this layer; the controller
/// is the only legitimate caller for user-initiated mutations.
#[derive(Clone)]
pub struct RecordSet<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Clone> RecordSet<T> {
    /// Wrap an existing shared sequence.
    pub fn new(records: Arc<RwLock<Vec<T>>>) -> Self {
        Self { records }
    }

    /// Build a detached set from initial records. Mostly useful in tests.
    pub fn from_records(records: Vec<T>) -> Self {
        Self::new(Arc::new(RwLock::new(records)))
    }

    /// Append records to the collection.
    pub async fn create<I>(&self, records: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.records.write().await.extend(records);
    }

    /// Remove every record matching the predicate. Records that are already
    /// gone are simply not matched, so a double-delete is a no-op. Returns
    /// the number of records removed.
    pub async fn delete<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| !predicate(record));
        before - records.len()
    }

    /// An independent snapshot of all records.
    pub async fn get(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    /// Clones of the records matching the predicate, in relative order.
    pub async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Mutate every matching record in place, under the write lock. This is
    /// the mutation path for callers that located records through a filtered
    /// query: the edit lands directly in the live collection. Returns the
    /// number of records modified.
    pub async fn modify<F, M>(&self, predicate: F, mut apply: M) -> usize
    where
        F: Fn(&T) -> bool,
        M: FnMut(&mut T),
    {
        let mut records = self.records.write().await;
        let mut modified = 0;
        for record in records.iter_mut().filter(|record| predicate(record)) {
            apply(record);
            modified += 1;
        }
        modified
    }

    /// Number of records in the collection.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
