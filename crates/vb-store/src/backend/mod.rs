//! Key-value storage adapters.
//!
//! The store talks to durable storage only through [`StorageBackend`]: one
//! string value per string key. Provided implementations:
//! - [`FileBackend`] - one JSON file per key in a data directory
//! - [`MemoryBackend`] - in-process map, with failure injection for tests

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::StorageError;

/// String-keyed blob store.
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
