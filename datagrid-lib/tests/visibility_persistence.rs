//! Column visibility survives reloads through the storage backends.

mod common;

use std::sync::Arc;

use common::{Lead, init_logging, lead_columns};
use datagrid_lib::DataGrid;
use datagrid_lib::column::{ColumnDescriptor, ColumnRegistry};
use datagrid_lib::storage::{MemoryBackend, SqliteBackend, StorageBackend};
use datagrid_lib::visibility::{VisibilityMap, VisibilityStore};

fn all_visible() -> VisibilityMap {
    [("name", true), ("email", true), ("phone", true)]
        .into_iter()
        .collect()
}

async fn leads_grid(backend: Arc<dyn StorageBackend>) -> DataGrid<Lead> {
    DataGrid::builder(lead_columns())
        .default_visible(["name", "email"])
        .persist("leads-list", backend)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_toggle_then_reload_round_trip() {
    init_logging();
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());

    let mut grid = leads_grid(backend.clone()).await;
    assert!(!grid.visibility().is_visible("phone"));
    assert!(grid.toggle_column("phone").await);
    drop(grid);

    let reloaded = leads_grid(backend).await;
    assert_eq!(reloaded.visibility(), &all_visible());
}

#[tokio::test]
async fn test_sqlite_round_trip_across_reopen() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid-state.db");

    {
        let backend = Arc::new(SqliteBackend::open(&path).await.unwrap());
        let mut grid = leads_grid(backend).await;
        grid.toggle_column("phone").await;
        grid.toggle_column("email").await;
    }

    let backend = Arc::new(SqliteBackend::open(&path).await.unwrap());
    let grid = leads_grid(backend).await;
    let keys: Vec<&str> = grid.visible_columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "phone"]);
}

#[tokio::test]
async fn test_locked_column_forced_visible_on_load() {
    init_logging();
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    let store = VisibilityStore::new("leads-list", backend.clone());
    let tampered: VisibilityMap = [("name", false), ("email", false), ("phone", false)]
        .into_iter()
        .collect();
    assert!(store.save(&tampered).await);

    let grid = leads_grid(backend).await;
    assert!(grid.visibility().is_visible("name"));
    assert!(!grid.visibility().is_visible("email"));
}

#[tokio::test]
async fn test_new_column_gets_default_and_removed_column_dropped() {
    init_logging();
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    let mut grid = leads_grid(backend.clone()).await;
    grid.toggle_column("phone").await;

    grid.set_columns(vec![
        ColumnDescriptor::new("name", "Name").locked(),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("company", "Company"),
    ])
    .await
    .unwrap();

    let expected: VisibilityMap = [("name", true), ("email", true), ("company", false)]
        .into_iter()
        .collect();
    assert_eq!(grid.visibility(), &expected);

    let registry = ColumnRegistry::new(vec![
        ColumnDescriptor::<Lead>::new("name", "Name").locked(),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("company", "Company"),
    ])
    .unwrap();
    let stored = VisibilityStore::new("leads-list", backend)
        .load(&registry, None)
        .await
        .unwrap();
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_corrupt_state_falls_back_to_defaults() {
    init_logging();
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    backend
        .set_bytes("leads-list", b"{not json".to_vec())
        .await
        .unwrap();

    let grid = leads_grid(backend).await;
    let keys: Vec<&str> = grid.visible_columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "email"]);
}

#[tokio::test]
async fn test_hide_all_then_reset() {
    init_logging();
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryBackend::new());
    let mut grid = leads_grid(backend).await;

    assert!(grid.show_all_columns().await);
    assert!(grid.hide_all_columns().await);
    assert!(!grid.hide_all_columns().await);
    let keys: Vec<&str> = grid.visible_columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name"]);

    assert!(grid.reset_columns().await);
    let keys: Vec<&str> = grid.visible_columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "email"]);
}
