//! On-disk layout of a persisted visibility map.
//!
//! ```json
//! { "version": 1, "columns": { "name": true, "phone": false } }
//! ```
//!
//! Bare `{ "name": true }` maps written before the version field existed are
//! still read and get rewritten in the current layout on the next save.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

use super::VisibilityMap;

/// Current schema version of the persisted layout.
pub const VISIBILITY_SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper around a [`VisibilityMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedVisibility {
    pub version: u32,
    pub columns: VisibilityMap,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned(PersistedVisibility),
    Legacy(VisibilityMap),
}

impl PersistedVisibility {
    /// Wrap a map in the current schema version.
    pub fn new(columns: VisibilityMap) -> Self {
        Self {
            version: VISIBILITY_SCHEMA_VERSION,
            columns,
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec(self).map_err(StorageError::Serialization)
    }

    /// Decode stored bytes.
    ///
    /// Returns `Ok(None)` when the bytes were written by an incompatible
    /// schema version and should be discarded.
    pub fn decode(bytes: &[u8]) -> Result<Option<VisibilityMap>, StorageError> {
        let stored: Stored =
            serde_json::from_slice(bytes).map_err(StorageError::Deserialization)?;
        match stored {
            Stored::Versioned(p) if p.version == VISIBILITY_SCHEMA_VERSION => Ok(Some(p.columns)),
            Stored::Versioned(p) => {
                log::info!(
                    "discarding visibility state with schema version {} (expected {})",
                    p.version,
                    VISIBILITY_SCHEMA_VERSION
                );
                Ok(None)
            }
            Stored::Legacy(map) => Ok(Some(map)),
        }
    }
}
