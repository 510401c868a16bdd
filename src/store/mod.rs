//! Record store adapter layer
//!
//! The backing store is a spreadsheet-like collection of named worksheets.
//! It offers exactly two primitives: load a whole worksheet and replace a
//! whole worksheet. There are no row-level writes, no locking and no
//! compare-and-swap, so every save is a full-table overwrite and concurrent
//! writers race (the later replace wins in full). The services above this
//! layer minimize the read-modify-write window by reloading immediately
//! before each write; they cannot eliminate the race.

pub mod csv_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{AppError, AppResult};

pub use csv_store::CsvStore;

/// Worksheet names consumed by the application
pub const SHEET_USERS: &str = "usuarios";
pub const SHEET_TICKETS: &str = "reparaciones";
pub const SHEET_CONFIG: &str = "config";

/// One worksheet row: an ordered mapping of column name to scalar value.
/// Column order is preserved across a load/replace round trip.
pub type SheetRow = IndexMap<String, Value>;

/// Whole-table access to one backing worksheet collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every row of the named worksheet
    async fn load(&self, worksheet: &str) -> AppResult<Vec<SheetRow>>;

    /// Overwrite the named worksheet with exactly these rows
    async fn replace(&self, worksheet: &str, rows: Vec<SheetRow>) -> AppResult<()>;
}

/// Store front used by the services: wraps the adapter with bounded
/// retry on transient read failures and column-name normalization.
#[derive(Clone)]
pub struct Store {
    adapter: Arc<dyn RecordStore>,
    read_attempts: u32,
    retry_delay: Duration,
}

impl Store {
    pub fn new(adapter: Arc<dyn RecordStore>, read_attempts: u32, retry_delay_ms: u64) -> Self {
        Self {
            adapter,
            read_attempts: read_attempts.max(1),
            retry_delay: Duration::from_millis(retry_delay_ms),
        }
    }

    /// Load a worksheet, retrying transient failures up to the configured
    /// bound. A missing worksheet is surfaced immediately, never retried.
    /// Column names come back trimmed of surrounding whitespace.
    pub async fn load(&self, worksheet: &str) -> AppResult<Vec<SheetRow>> {
        let mut last_err = None;
        for attempt in 1..=self.read_attempts {
            match self.adapter.load(worksheet).await {
                Ok(rows) => return Ok(rows.into_iter().map(normalize_columns).collect()),
                Err(err @ AppError::StoreUnavailable(_)) => {
                    tracing::warn!(
                        "Load of '{}' failed (attempt {}/{}): {}",
                        worksheet,
                        attempt,
                        self.read_attempts,
                        err
                    );
                    last_err = Some(err);
                    if attempt < self.read_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            AppError::StoreUnavailable(format!("load of '{}' failed", worksheet))
        }))
    }

    /// Replace a worksheet wholesale. Best effort: a concurrent writer's
    /// update between our load and this call is silently overwritten.
    pub async fn replace(&self, worksheet: &str, rows: Vec<SheetRow>) -> AppResult<()> {
        self.adapter.replace(worksheet, rows).await
    }
}

/// Trim surrounding whitespace from every column name of a row
fn normalize_columns(row: SheetRow) -> SheetRow {
    row.into_iter()
        .map(|(k, v)| (k.trim().to_string(), v))
        .collect()
}

/// Read a column as text. Numbers are coerced to their decimal string
/// form; an absent column, null or empty string yields `None`.
pub fn row_string(row: &SheetRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> SheetRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_normalize_columns_trims_names() {
        let normalized = normalize_columns(row(&[(" Cliente ", json!("Ana")), ("Costo", json!(10))]));
        assert!(normalized.contains_key("Cliente"));
        assert_eq!(row_string(&normalized, "Cliente").as_deref(), Some("Ana"));
    }

    #[test]
    fn test_row_string_coerces_numbers() {
        let r = row(&[("Costo", json!(150.5)), ("Folio", json!(""))]);
        assert_eq!(row_string(&r, "Costo").as_deref(), Some("150.5"));
        assert_eq!(row_string(&r, "Folio"), None);
        assert_eq!(row_string(&r, "Telefono"), None);
    }

    #[tokio::test]
    async fn test_load_retries_transient_failures() {
        let mut mock = MockRecordStore::new();
        let mut calls = 0u32;
        mock.expect_load().times(3).returning(move |_| {
            calls += 1;
            if calls < 3 {
                Err(AppError::StoreUnavailable("connection reset".into()))
            } else {
                Ok(vec![])
            }
        });
        let store = Store::new(Arc::new(mock), 3, 0);
        assert!(store.load(SHEET_TICKETS).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_does_not_retry_missing_worksheet() {
        let mut mock = MockRecordStore::new();
        mock.expect_load()
            .times(1)
            .returning(|_| Err(AppError::WorksheetNotFound("garantias".into())));
        let store = Store::new(Arc::new(mock), 3, 0);
        let err = store.load("garantias").await.unwrap_err();
        assert!(matches!(err, AppError::WorksheetNotFound(_)));
    }

    #[tokio::test]
    async fn test_load_gives_up_after_bounded_attempts() {
        let mut mock = MockRecordStore::new();
        mock.expect_load()
            .times(3)
            .returning(|_| Err(AppError::StoreUnavailable("timeout".into())));
        let store = Store::new(Arc::new(mock), 3, 0);
        let err = store.load(SHEET_TICKETS).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
