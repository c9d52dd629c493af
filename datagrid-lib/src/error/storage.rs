//! Storage error types

/// Errors from a persistence backend.
///
/// The visibility store swallows these after logging them; they only reach
/// callers that talk to a backend directly.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
