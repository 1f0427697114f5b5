//! Record store: the persistent collection of sale records
//!
//! The store owns filtering and grouping so callers only describe what they
//! want through a [`SaleFilter`].

use async_trait::async_trait;
use salesboard_config::StoreLocation;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::models::{SaleRecord, StoredRecord};
use crate::query::{Pagination, SaleFilter};

/// Store reference type
pub type StoreRef = Arc<dyn RecordStore>;

/// Operations every record store backend provides
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Matching records in store order, windowed by `pagination`
    async fn find(&self, filter: &SaleFilter, pagination: Pagination) -> CoreResult<Vec<StoredRecord>>;

    /// Number of matching records
    async fn count(&self, filter: &SaleFilter) -> CoreResult<usize>;

    /// Sum of the prices of matching records, 0 when none match
    async fn sum_price(&self, filter: &SaleFilter) -> CoreResult<f64>;

    /// Matching records grouped by lowercased category
    async fn count_by_category(&self, filter: &SaleFilter) -> CoreResult<Vec<(String, usize)>>;

    /// Drop every record and insert `records`, returning how many were inserted
    async fn replace_all(&self, records: Vec<SaleRecord>) -> CoreResult<usize>;

    /// Total number of records
    async fn len(&self) -> CoreResult<usize>;
}

/// In-memory store, optionally persisted to a JSON snapshot file
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredRecord>>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// Empty store with no persistence
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store for `location`, reloading the snapshot if one exists
    pub async fn open(location: &StoreLocation) -> CoreResult<Self> {
        match location {
            StoreLocation::Memory => Ok(Self::new()),
            StoreLocation::Snapshot(path) => {
                let records = load_snapshot(path).await?;
                log::info!("Record store opened at {} with {} records", path.display(), records.len());
                Ok(Self {
                    records: RwLock::new(records),
                    snapshot: Some(path.clone()),
                })
            }
        }
    }

    /// Snapshot path, if this store persists
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref()
    }
}

async fn load_snapshot(path: &Path) -> CoreResult<Vec<StoredRecord>> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(snapshot_error(path, e)),
    };
    serde_json::from_slice(&content).map_err(|e| snapshot_error(path, e))
}

/// Write to a sibling temp file and rename, so a crash never leaves half a snapshot
async fn save_snapshot(path: &Path, records: &[StoredRecord]) -> CoreResult<()> {
    let content = serde_json::to_vec(records).map_err(|e| snapshot_error(path, e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| snapshot_error(path, e))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    tokio::fs::write(&tmp, content).await.map_err(|e| snapshot_error(path, e))?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| snapshot_error(path, e))?;
    Ok(())
}

fn snapshot_error(path: &Path, error: impl ToString) -> CoreError {
    CoreError::Snapshot {
        path: path.to_string_lossy().to_string(),
        message: error.to_string(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(&self, filter: &SaleFilter, pagination: Pagination) -> CoreResult<Vec<StoredRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.record))
            .skip(pagination.skip())
            .take(pagination.per_page)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &SaleFilter) -> CoreResult<usize> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(&r.record)).count())
    }

    async fn sum_price(&self, filter: &SaleFilter) -> CoreResult<f64> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.record))
            .map(|r| r.record.price)
            .sum())
    }

    async fn count_by_category(&self, filter: &SaleFilter) -> CoreResult<Vec<(String, usize)>> {
        let records = self.records.read().await;
        let mut groups: BTreeMap<String, usize> = BTreeMap::new();
        for r in records.iter().filter(|r| filter.matches(&r.record)) {
            *groups.entry(r.record.category.to_lowercase()).or_insert(0) += 1;
        }
        Ok(groups.into_iter().collect())
    }

    async fn replace_all(&self, records: Vec<SaleRecord>) -> CoreResult<usize> {
        let stored: Vec<StoredRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| StoredRecord { id: i as u64 + 1, record })
            .collect();

        // Snapshot and memory change under one write guard so they never disagree
        let mut records = self.records.write().await;
        if let Some(path) = &self.snapshot {
            save_snapshot(path, &stored).await?;
            log::info!("Snapshot of {} records written to {}", stored.len(), path.display());
        }

        let inserted = stored.len();
        *records = stored;
        Ok(inserted)
    }

    async fn len(&self) -> CoreResult<usize> {
        Ok(self.records.read().await.len())
    }
}
