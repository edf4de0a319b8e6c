//! Persistent key-value storage boundary.

use std::path::PathBuf;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

use crate::StoreError;

/// Capability interface for persistent key-value storage.
///
/// This is the narrow seam between the data layer and whatever durable
/// storage the host provides; test doubles swap in trivially.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Retrieve a value, or `None` if the key has never been set.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Set the value of a key.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove a key/value pair. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage. Useful for testing and ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    values: DashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all stored values.
    pub fn clear(&self) {
        self.values.clear();
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Durable storage backed by a single JSON object file.
///
/// Each key is a field of the top-level object. Writes are read-modify-write
/// of the whole file; callers serialize their own write sequences.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<serde_json::Map<String, Value>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let value: Value = serde_json::from_slice(&bytes)?;
                match value {
                    Value::Object(map) => Ok(map),
                    other => Err(StoreError::Backend(format!(
                        "expected a JSON object at {}, found {other}",
                        self.path.display()
                    ))),
                }
            }
            // A missing file is an empty store
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(serde_json::Map::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, map: serde_json::Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&Value::Object(map))?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "wrote storage file");
        Ok(())
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);
        self.write_all(map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_all().await?;
        if map.remove(key).is_some() {
            self.write_all(map).await?;
        }
        Ok(())
    }
}
