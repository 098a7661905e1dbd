//! Market sub-client: latest ticker price.

use crate::client::RelayClient;
use crate::domain::market::TickerPrice;
use crate::domain::request::Request;
use crate::error::RelayError;
use crate::shared::Symbol;

/// Sub-client for market data.
pub struct Markets<'a> {
    pub(crate) client: &'a RelayClient,
}

impl<'a> Markets<'a> {
    /// Fetch the latest price for `symbol` (unsigned).
    ///
    /// With a logger configured the price is also appended to the price
    /// history; a failed write is traced and does not fail the call.
    pub async fn price(&self, symbol: impl Into<Symbol>) -> Result<TickerPrice, RelayError> {
        let body = self
            .client
            .send_checked(&Request::price_update(symbol))
            .await?;
        let ticker: TickerPrice = serde_json::from_value(body)?;

        if let Some(logger) = &self.client.logger {
            if let Err(e) = logger.log_price(&ticker).await {
                tracing::error!(symbol = %ticker.symbol, "Failed to record price: {}", e);
            }
        }
        Ok(ticker)
    }
}
