//! Configuration error types

/// Errors raised while validating host-supplied columns and rows.
///
/// These are reported when the grid is constructed or handed a new row set,
/// never in the middle of a render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share the same key.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// A column was declared with an empty key.
    #[error("column key must not be empty")]
    EmptyColumnKey,

    /// Two rows produced the same identifier.
    #[error("duplicate row id: {0}")]
    DuplicateRowId(String),

    /// A column key was referenced that is not in the registry.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}
