//! CSV-file record store adapter
//!
//! One `<worksheet>.csv` file per worksheet under a configured directory.
//! This is the local stand-in for the shop's hosted spreadsheet: it honours
//! the same contract (whole-table load, whole-table replace, nothing else).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    store::{RecordStore, SheetRow},
};

pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn sheet_path(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", worksheet))
    }
}

#[async_trait]
impl RecordStore for CsvStore {
    async fn load(&self, worksheet: &str) -> AppResult<Vec<SheetRow>> {
        let path = self.sheet_path(worksheet);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(AppError::WorksheetNotFound(worksheet.to_string()));
            }
            Err(err) => {
                return Err(AppError::StoreUnavailable(format!(
                    "reading '{}': {}",
                    path.display(),
                    err
                )));
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());
        let headers = reader
            .headers()
            .map_err(|err| AppError::MalformedRow {
                worksheet: worksheet.to_string(),
                reason: format!("unreadable header: {}", err),
            })?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| AppError::MalformedRow {
                worksheet: worksheet.to_string(),
                reason: err.to_string(),
            })?;
            let mut row = SheetRow::new();
            for (i, header) in headers.iter().enumerate() {
                let cell = record.get(i).unwrap_or("");
                row.insert(header.to_string(), Value::String(cell.to_string()));
            }
            rows.push(row);
        }
        Ok(rows)
    }

    async fn replace(&self, worksheet: &str, rows: Vec<SheetRow>) -> AppResult<()> {
        // Header set: union of all row columns, first-seen order.
        let mut headers: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        if !headers.is_empty() {
            writer
                .write_record(&headers)
                .map_err(|err| AppError::StoreUnavailable(err.to_string()))?;
            for row in &rows {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| row.get(h).map(cell_text).unwrap_or_default())
                    .collect();
                writer
                    .write_record(&record)
                    .map_err(|err| AppError::StoreUnavailable(err.to_string()))?;
            }
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| AppError::StoreUnavailable(err.to_string()))?;

        // Write to a sibling temp file and rename, so a failed write never
        // leaves a truncated worksheet behind.
        let path = self.sheet_path(worksheet);
        let tmp = self.dir.join(format!(".{}.csv.tmp", worksheet));
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| AppError::StoreUnavailable(format!("writing '{}': {}", worksheet, err)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|err| AppError::StoreUnavailable(format!("replacing '{}': {}", worksheet, err)))?;
        Ok(())
    }
}

/// Text form of one cell for the CSV file
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> SheetRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_worksheet_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let err = store.load("reparaciones").await.unwrap_err();
        assert!(matches!(err, AppError::WorksheetNotFound(name) if name == "reparaciones"));
    }

    #[tokio::test]
    async fn test_replace_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        let rows = vec![
            row(&[("Folio", "T-001"), ("Cliente", "Ana"), ("Estado", "Recibido")]),
            row(&[("Folio", "T-002"), ("Cliente", "Luis, hijo"), ("Estado", "Entregado")]),
        ];
        store.replace("reparaciones", rows).await.unwrap();

        let loaded = store.load("reparaciones").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0]["Folio"], json!("T-001"));
        // Quoted cells survive the round trip
        assert_eq!(loaded[1]["Cliente"], json!("Luis, hijo"));
        // Column order is preserved
        let columns: Vec<&String> = loaded[0].keys().collect();
        assert_eq!(columns, ["Folio", "Cliente", "Estado"]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_the_whole_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        store
            .replace("reparaciones", vec![row(&[("Folio", "T-001")])])
            .await
            .unwrap();
        store
            .replace("reparaciones", vec![row(&[("Folio", "T-009")])])
            .await
            .unwrap();

        let loaded = store.load("reparaciones").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0]["Folio"], json!("T-009"));
    }
}
