//! Market domain: latest ticker prices.

#[cfg(feature = "http")]
pub mod client;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::request::log::iso8601;
use crate::domain::request::LogRecord;
use crate::shared::Symbol;

/// Table that recorded prices land in.
pub const PRICES_TABLE: &str = "prices";

// ─── TickerPrice ─────────────────────────────────────────────────────────────

/// Body of `GET api/v3/ticker/price?symbol=…`:
/// `{"symbol": "BTCUSDT", "price": "64000.50000000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: Symbol,
    pub price: Decimal,
}

impl TickerPrice {
    /// Price-history record stamped with the current time.
    pub fn log_info(&self) -> LogRecord {
        self.log_info_at(Utc::now())
    }

    pub fn log_info_at(&self, created_at: DateTime<Utc>) -> LogRecord {
        LogRecord::new(PRICES_TABLE)
            .field("asset", self.symbol.as_str())
            .field("price", self.price.to_string())
            .field("time", iso8601(created_at))
    }
}
