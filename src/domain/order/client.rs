//! Orders sub-client: signed LIMIT_MAKER placement.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::client::RelayClient;
use crate::domain::request::Request;
use crate::error::RelayError;
use crate::shared::Symbol;

/// Sub-client for order placement.
pub struct Orders<'a> {
    pub(crate) client: &'a RelayClient,
}

impl<'a> Orders<'a> {
    /// Place a LIMIT_MAKER buy. Returns the exchange's acknowledgement.
    pub async fn buy(
        &self,
        symbol: impl Into<Symbol>,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Value, RelayError> {
        self.client
            .send_checked(&Request::buy(symbol, price, quantity))
            .await
    }

    /// Place a LIMIT_MAKER sell.
    pub async fn sell(
        &self,
        symbol: impl Into<Symbol>,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<Value, RelayError> {
        self.client
            .send_checked(&Request::sell(symbol, price, quantity))
            .await
    }
}
