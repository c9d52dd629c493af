//! Durable key-value storage for per-view grid state.
//!
//! Provides a `StorageBackend` trait with an in-memory implementation for
//! tests and short-lived views, and a SQLite implementation that survives
//! restarts.

mod memory;
mod paths;
mod sqlite;

pub use memory::MemoryBackend;
pub use paths::StatePaths;
pub use sqlite::SqliteBackend;

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend trait for grid state storage.
///
/// Implementations handle raw byte storage/retrieval. The
/// [`VisibilityStore`](crate::visibility::VisibilityStore) wraps this with
/// the versioned JSON layout.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Get raw bytes for a key.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Set raw bytes for a key.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
