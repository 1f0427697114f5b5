//! Seed loading: fetch the upstream sale records and replace the store contents

use async_trait::async_trait;
use salesboard_config::SeedConfig;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::models::SaleRecord;
use crate::reports::SeedReport;
use crate::store::StoreRef;

/// Seed source reference type
pub type SeedSourceRef = Arc<dyn SeedSource>;

/// Where seed records come from
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch and decode the full record set
    async fn fetch(&self) -> CoreResult<Vec<SaleRecord>>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// Fetches a JSON array of sale records over HTTP
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Internal {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &SeedConfig) -> CoreResult<Self> {
        Self::new(config.source_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    fn fetch_error(&self, message: impl ToString) -> CoreError {
        CoreError::SeedFetch {
            url: self.url.clone(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> CoreResult<Vec<SaleRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.fetch_error(format!("upstream answered {}", status)));
        }

        let body = response.bytes().await.map_err(|e| self.fetch_error(e))?;
        decode_records(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Decode an upstream payload; one bad record rejects the whole payload
pub fn decode_records(body: &[u8]) -> CoreResult<Vec<SaleRecord>> {
    serde_json::from_slice(body).map_err(|e| CoreError::SeedDecode {
        message: e.to_string(),
    })
}

/// A fixed record set, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    records: Vec<SaleRecord>,
}

impl StaticSeedSource {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> CoreResult<Vec<SaleRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}

/// Replaces the store contents with a fresh fetch from the seed source
#[derive(Clone)]
pub struct SeedLoader {
    source: SeedSourceRef,
    store: StoreRef,
}

impl SeedLoader {
    pub fn new(source: SeedSourceRef, store: StoreRef) -> Self {
        Self { source, store }
    }

    /// Fetch first; the store is only touched once the fetch has succeeded
    pub async fn run(&self) -> CoreResult<SeedReport> {
        log::info!("Seeding record store from {}", self.source.describe());
        let records = self.source.fetch().await?;
        let inserted = self.store.replace_all(records).await?;
        log::info!("Seed complete: {} records inserted", inserted);
        Ok(SeedReport { inserted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;
    use crate::store::MemoryStore;

    struct BrokenSource;

    #[async_trait]
    impl SeedSource for BrokenSource {
        async fn fetch(&self) -> CoreResult<Vec<SaleRecord>> {
            Err(CoreError::SeedFetch {
                url: "http://upstream".to_string(),
                message: "connection reset".to_string(),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn payload() -> Vec<SaleRecord> {
        vec![
            record("A", 10.0, "x", "2022-03-01", true),
            record("B", 20.0, "y", "2022-04-01", false),
            record("C", 30.0, "y", "2022-05-01", false),
        ]
    }

    #[tokio::test]
    async fn test_seeding_twice_replaces() {
        let store: StoreRef = Arc::new(MemoryStore::new());
        let loader = SeedLoader::new(Arc::new(StaticSeedSource::new(payload())), store.clone());

        assert_eq!(loader.run().await.unwrap(), SeedReport { inserted: 3 });
        assert_eq!(loader.run().await.unwrap(), SeedReport { inserted: 3 });
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_existing_records() {
        let store: StoreRef = Arc::new(MemoryStore::new());
        store.replace_all(payload()).await.unwrap();

        let loader = SeedLoader::new(Arc::new(BrokenSource), store.clone());
        let err = loader.run().await.unwrap_err();

        assert!(matches!(err, CoreError::SeedFetch { .. }));
        assert_eq!(store.len().await.unwrap(), 3);
    }

    #[test]
    fn test_decode_records() {
        let body = br#"[
            {"id": 1, "title": "Backpack", "price": 109.95, "description": "Fits 15 laptops",
             "category": "men's clothing", "image": "https://img/1.jpg", "sold": false,
             "dateOfSale": "2021-11-27T20:29:54+05:30"},
            {"id": 2, "title": "Tee", "price": 22.3, "description": "Slim fit",
             "category": "men's clothing", "image": "https://img/2.jpg", "sold": true,
             "dateOfSale": "2021-10-27T20:29:54+05:30"}
        ]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Tee");
        assert_eq!(records[1].sold, Some(true));
    }

    #[test]
    fn test_decode_tolerates_null_and_missing_fields() {
        let body = br#"[
            {"title": null, "price": 10, "category": null, "sold": null,
             "dateOfSale": "2022-03-01T10:00:00+05:30"},
            {"title": "Mug", "price": 20, "dateOfSale": "2022-03-02T10:00:00+05:30"}
        ]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].title.is_empty());
        assert_eq!(records[0].sold, None);
        assert_eq!(records[1].sold, None);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_records(br#"{"message": "Access Denied"}"#).unwrap_err();
        assert!(matches!(err, CoreError::SeedDecode { .. }));

        let err = decode_records(br#"[{"title": "no price or date"}]"#).unwrap_err();
        assert!(matches!(err, CoreError::SeedDecode { .. }));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        let source = HttpSeedSource::new("http://127.0.0.1:9/seed.json", Duration::from_secs(2)).unwrap();
        let store: StoreRef = Arc::new(MemoryStore::new());
        store.replace_all(payload()).await.unwrap();

        let err = SeedLoader::new(Arc::new(source), store.clone()).run().await.unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::SeedFetchFailed);
        assert_eq!(store.len().await.unwrap(), 3);
    }
}
