//! Alias data layer for Beacon.
//!
//! This crate provides:
//! - The `Alias` record and its create/update/delete payload types
//! - A synchronized single-slot lazy cache for async initialization
//! - An in-memory record set shared behind a lock
//! - The storage capability trait with in-memory and JSON-file backends
//! - `AliasContext`, the single writer path to persistent storage

mod cache;
mod context;
mod error;
mod seed;
mod set;
mod storage;
mod types;

pub use cache::{Initializer, SyncedCache};
pub use context::{ALIAS_DATA_KEY, AliasContext};
pub use error::StoreError;
pub use seed::example_aliases;
pub use set::RecordSet;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use types::{Alias, AliasCreate, AliasDelete, AliasUpdate};
