//! Persistence for visibility maps.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::column::ColumnRegistry;
use crate::model::GridRow;
use crate::storage::StorageBackend;

use super::{PersistedVisibility, VisibilityMap};

/// Reads and writes one view's visibility map under a storage key.
///
/// Every storage failure is logged and swallowed: a broken backend only
/// means the view falls back to its in-memory default. Two stores sharing a
/// key overwrite each other, so hosts should use one key per logical view.
#[derive(Clone)]
pub struct VisibilityStore {
    target: Option<(String, Arc<dyn StorageBackend>)>,
}

impl VisibilityStore {
    /// Store that persists under `key` in `backend`.
    pub fn new(key: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            target: Some((key.into(), backend)),
        }
    }

    /// Store that keeps nothing between sessions.
    pub fn ephemeral() -> Self {
        Self { target: None }
    }

    /// The storage key, if persistent.
    pub fn key(&self) -> Option<&str> {
        self.target.as_ref().map(|(key, _)| key.as_str())
    }

    /// Load the persisted map, reconciled against the current registry.
    ///
    /// Locked columns come back visible even if the stored state says
    /// otherwise. Returns `None` when nothing usable is stored.
    pub async fn load<R: GridRow>(
        &self,
        registry: &ColumnRegistry<R>,
        default_visible: Option<&BTreeSet<String>>,
    ) -> Option<VisibilityMap> {
        let (key, backend) = self.target.as_ref()?;
        let bytes = match backend.get_bytes(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("failed to read visibility for {}: {}", key, e);
                return None;
            }
        };
        match PersistedVisibility::decode(&bytes) {
            Ok(Some(map)) => {
                log::debug!("loaded visibility for {}", key);
                Some(super::reconcile(registry, &map, default_visible))
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("ignoring unreadable visibility for {}: {}", key, e);
                None
            }
        }
    }

    /// Persist a map. Returns `true` if it was written.
    pub async fn save(&self, map: &VisibilityMap) -> bool {
        let Some((key, backend)) = self.target.as_ref() else {
            return false;
        };
        let bytes = match PersistedVisibility::new(map.clone()).to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("failed to encode visibility for {}: {}", key, e);
                return false;
            }
        };
        match backend.set_bytes(key, bytes).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("failed to write visibility for {}: {}", key, e);
                false
            }
        }
    }

    /// Remove the persisted map.
    pub async fn clear(&self) {
        if let Some((key, backend)) = self.target.as_ref() {
            if let Err(e) = backend.delete(key).await {
                log::warn!("failed to clear visibility for {}: {}", key, e);
            }
        }
    }

    /// See [`super::reconcile`].
    pub fn reconcile<R: GridRow>(
        &self,
        registry: &ColumnRegistry<R>,
        map: &VisibilityMap,
        default_visible: Option<&BTreeSet<String>>,
    ) -> VisibilityMap {
        super::reconcile(registry, map, default_visible)
    }

    /// See [`super::reset_to_default`].
    pub fn reset_to_default<R: GridRow>(
        &self,
        registry: &ColumnRegistry<R>,
        default_visible: Option<&BTreeSet<String>>,
    ) -> VisibilityMap {
        super::reset_to_default(registry, default_visible)
    }
}

impl Default for VisibilityStore {
    fn default() -> Self {
        Self::ephemeral()
    }
}

impl fmt::Debug for VisibilityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityStore")
            .field("key", &self.key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDescriptor;
    use crate::error::StorageError;
    use crate::model::CellValue;
    use crate::storage::MemoryBackend;
    use async_trait::async_trait;

    #[derive(Clone)]
    struct Row;

    impl GridRow for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            0
        }

        fn value(&self, _column: &str) -> CellValue {
            CellValue::Null
        }
    }

    struct BrokenBackend;

    #[async_trait]
    impl StorageBackend for BrokenBackend {
        async fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }

        async fn set_bytes(&self, _key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }
    }

    fn registry(name_locked: bool) -> ColumnRegistry<Row> {
        let name = ColumnDescriptor::new("name", "Name");
        let name = if name_locked { name.locked() } else { name };
        ColumnRegistry::new(vec![name, ColumnDescriptor::new("email", "Email")]).unwrap()
    }

    #[tokio::test]
    async fn test_load_reasserts_locked() {
        let backend = Arc::new(MemoryBackend::new());
        let store = VisibilityStore::new("contacts", backend);

        // Saved while "name" was still hideable.
        let map: VisibilityMap = [("name", false), ("email", true)].into_iter().collect();
        assert!(store.save(&map).await);

        let loaded = store.load(&registry(true), None).await.unwrap();
        assert_eq!(loaded.get("name"), Some(true));
    }

    #[tokio::test]
    async fn test_broken_backend_degrades() {
        let store = VisibilityStore::new("contacts", Arc::new(BrokenBackend));
        assert!(store.load(&registry(true), None).await.is_none());
        assert!(!store.save(&VisibilityMap::new()).await);
        store.clear().await;
    }

    #[tokio::test]
    async fn test_corrupt_state_is_ignored() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_bytes("contacts", b"{oops".to_vec()).await.unwrap();
        let store = VisibilityStore::new("contacts", backend);
        assert!(store.load(&registry(false), None).await.is_none());
    }

    #[tokio::test]
    async fn test_ephemeral_store() {
        let store = VisibilityStore::ephemeral();
        assert!(!store.save(&VisibilityMap::new()).await);
        assert!(store.load(&registry(false), None).await.is_none());
        assert_eq!(store.key(), None);
    }
}
