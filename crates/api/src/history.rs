//! Where history rows come from.
//!
//! The engine never fetches anything itself; the API asks a [`HistorySource`]
//! for the rows of the requested skus and hands them over. Rows are filtered by
//! sku only so the resolver can still apply its single-record and unlabelled
//! fallbacks to mislabelled data.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

use shipplan_allocation::HistoryRecord;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed history data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read/write access to stock and sales history.
pub trait HistorySource: Send + Sync + 'static {
    /// All rows whose sku is in `skus`, in ingestion order.
    fn fetch(&self, skus: &[String]) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Append rows as-is (duplicates included). Returns the number accepted.
    fn ingest(&self, records: Vec<HistoryRecord>) -> Result<usize, HistoryError>;
}

/// Process-local history rows (dev/test, or seeded from a JSON export).
#[derive(Debug, Default)]
pub struct InMemoryHistorySource {
    rows: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self {
            rows: RwLock::new(records),
        }
    }

    /// Load a JSON array of [`HistoryRecord`]s.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<HistoryRecord> = serde_json::from_str(&raw)?;
        Ok(Self::with_records(records))
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistorySource for InMemoryHistorySource {
    fn fetch(&self, skus: &[String]) -> Result<Vec<HistoryRecord>, HistoryError> {
        let wanted: HashSet<&str> = skus.iter().map(String::as_str).collect();
        let rows = self
            .rows
            .read()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;

        Ok(rows
            .iter()
            .filter(|r| wanted.contains(r.sku.as_str()))
            .cloned()
            .collect())
    }

    fn ingest(&self, records: Vec<HistoryRecord>) -> Result<usize, HistoryError> {
        let accepted = records.len();
        let mut rows = self
            .rows
            .write()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        rows.extend(records);
        Ok(accepted)
    }
}
