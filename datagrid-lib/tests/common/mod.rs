//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use datagrid_lib::bulk::{BulkHandler, BulkOperation};
use datagrid_lib::column::ColumnDescriptor;
use datagrid_lib::error::MutationError;
use datagrid_lib::model::{CellValue, GridRow};
use simplelog::{Config, LevelFilter, TestLogger};

/// Route library logs to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Lead {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            phone: None,
        }
    }
}

impl GridRow for Lead {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn value(&self, column: &str) -> CellValue {
        match column {
            "name" => self.name.as_str().into(),
            "email" => self.email.clone().into(),
            "phone" => self.phone.clone().into(),
            _ => CellValue::Null,
        }
    }
}

pub fn lead_columns() -> Vec<ColumnDescriptor<Lead>> {
    vec![
        ColumnDescriptor::new("name", "Name").sortable().locked(),
        ColumnDescriptor::new("email", "Email").sortable(),
        ColumnDescriptor::new("phone", "Phone"),
    ]
}

/// Host API double that fails for a fixed set of row ids.
#[derive(Default)]
pub struct FakeLeadsApi {
    pub fail_on: Vec<String>,
    pub calls: Mutex<Vec<String>>,
    pub refreshes: AtomicUsize,
}

impl FakeLeadsApi {
    pub fn failing_on(ids: &[&str]) -> Self {
        Self {
            fail_on: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BulkHandler<Lead> for FakeLeadsApi {
    async fn mutate(&self, _op: &BulkOperation, row: &Lead) -> Result<(), MutationError> {
        tokio::task::yield_now().await;
        self.calls.lock().unwrap().push(row.id.clone());
        if self.fail_on.contains(&row.id) {
            Err(MutationError::http(403, format!("no access to {}", row.id)))
        } else {
            Ok(())
        }
    }

    async fn refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}
