//! Request audit logging.
//!
//! `RequestLogger` turns a request (or a fetched price) into its
//! [`LogRecord`] and hands it to [`Storage::insert`]. Failures are returned to
//! the caller as-is; nothing is retried here.

use std::sync::Arc;

use crate::domain::market::TickerPrice;
use crate::domain::request::{LogRecord, Request};
use crate::error::StorageError;
use crate::storage::Storage;

/// Persists audit records through a [`Storage`] backend.
#[derive(Clone)]
pub struct RequestLogger {
    storage: Arc<dyn Storage>,
}

impl RequestLogger {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persist `request.log_info()`; returns the new row id.
    pub async fn log_request(&self, request: &Request) -> Result<i64, StorageError> {
        self.log_record(&request.log_info()).await
    }

    /// Persist a fetched price into the price history.
    pub async fn log_price(&self, ticker: &TickerPrice) -> Result<i64, StorageError> {
        self.log_record(&ticker.log_info()).await
    }

    pub async fn log_record(&self, record: &LogRecord) -> Result<i64, StorageError> {
        let id = self.storage.insert(&record.table, &record.fields).await?;
        tracing::debug!(table = %record.table, id, "Audit record stored");
        Ok(id)
    }
}

impl std::fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLogger").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::Fields;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    /// Storage that keeps rows in memory, or fails every insert.
    #[derive(Default)]
    pub(crate) struct MemoryStorage {
        pub(crate) rows: Mutex<Vec<(String, Fields)>>,
        pub(crate) fail: bool,
    }

    impl MemoryStorage {
        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(crate) fn rows(&self) -> Vec<(String, Fields)> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn insert(&self, table: &str, fields: &Fields) -> Result<i64, StorageError> {
            if self.fail {
                return Err(StorageError::Backend("disk full".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            rows.push((table.to_string(), fields.clone()));
            Ok(rows.len() as i64)
        }
    }

    #[tokio::test]
    async fn test_log_request_inserts_log_info() {
        let storage = Arc::new(MemoryStorage::default());
        let logger = RequestLogger::from_shared(storage.clone());

        let id = logger
            .log_request(&Request::buy("BTCUSDT", Decimal::ONE, Decimal::ONE))
            .await
            .unwrap();

        assert_eq!(id, 1);
        let rows = storage.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "requests");
        assert_eq!(rows[0].1["type"], "BUY");
        assert!(rows[0].1.contains_key("time"));
    }

    #[tokio::test]
    async fn test_log_price_inserts_into_prices() {
        let storage = Arc::new(MemoryStorage::default());
        let logger = RequestLogger::from_shared(storage.clone());
        let ticker = TickerPrice {
            symbol: "BTCUSDT".into(),
            price: Decimal::new(6400050, 2),
        };

        logger.log_price(&ticker).await.unwrap();

        let rows = storage.rows();
        assert_eq!(rows[0].0, "prices");
        assert_eq!(rows[0].1["asset"], "BTCUSDT");
        assert_eq!(rows[0].1["price"], "64000.50");
    }

    #[tokio::test]
    async fn test_storage_failure_is_returned() {
        let logger = RequestLogger::new(MemoryStorage::failing());
        let err = logger
            .log_request(&Request::wallet_update())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_log_request_into_sqlite() {
        use crate::storage::sqlite::SqliteStore;

        let store = SqliteStore::in_memory().await.unwrap();
        store.bootstrap().await.unwrap();
        let logger = RequestLogger::new(store.clone());

        for request in [
            Request::sell("BTCUSDT", Decimal::ONE, Decimal::ONE),
            Request::price_update("BTCUSDT"),
            Request::wallet_update(),
        ] {
            logger.log_request(&request).await.unwrap();
        }

        let rows = store
            .select("requests", &["type"], &Fields::new(), &[], None)
            .await
            .unwrap();
        let kinds: Vec<&str> = rows.iter().filter_map(|row| row["type"].as_text()).collect();
        assert_eq!(kinds, ["SELL", "PRICE_UPDATE", "WALLET_UPDATE"]);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_log_price_into_sqlite_keeps_exact_text() {
        use crate::storage::sqlite::{SortOrder, SqliteStore};
        use std::str::FromStr;

        let store = SqliteStore::in_memory().await.unwrap();
        store.bootstrap().await.unwrap();
        let logger = RequestLogger::new(store.clone());

        let quoted = ["100.00000000", "0.12345678901234567890", "64000.50000000"];
        for price in quoted {
            let ticker = TickerPrice {
                symbol: "BTCUSDT".into(),
                price: Decimal::from_str(price).unwrap(),
            };
            logger.log_price(&ticker).await.unwrap();
        }

        let rows = store
            .select("prices", &["price"], &Fields::new(), &[("id", SortOrder::Asc)], None)
            .await
            .unwrap();
        let stored: Vec<&str> = rows.iter().filter_map(|row| row["price"].as_text()).collect();
        assert_eq!(stored, quoted);
    }
}
