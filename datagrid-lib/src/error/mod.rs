//! Error types

mod config;
mod mutation;
mod storage;

pub use config::*;
pub use mutation::*;
pub use storage::*;

/// Top-level error for grid construction and configuration.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid column or row configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
