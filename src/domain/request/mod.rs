//! Request domain: the closed set of calls the relay can make.
//!
//! Every variant knows how to render itself into a [`ComposedRequest`] (method,
//! signed flag, path, canonical parameters) and into an audit [`LogRecord`].
//! Method and signed flag follow from the kind alone; callers only supply the
//! domain fields.
//!
//! | Variant | Method | Signed | Path |
//! |---|---|---|---|
//! | `Sell` | POST | yes | `api/v3/order` |
//! | `Buy` | POST | yes | `api/v3/order` |
//! | `PriceUpdate` | GET | no | `api/v3/ticker/price` |
//! | `WalletUpdate` | GET | yes | `api/v3/account` |

pub(crate) mod log;
pub mod params;

pub use log::{LogRecord, REQUESTS_TABLE};
pub use params::CanonicalParams;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::network::RECV_WINDOW_MS;
use crate::shared::{now_millis, HttpMethod, Symbol};

const ORDER_PATH: &str = "api/v3/order";
const TICKER_PRICE_PATH: &str = "api/v3/ticker/price";
const ACCOUNT_PATH: &str = "api/v3/account";

/// Order type for every order the relay places: rejected instead of
/// crossing the book.
const LIMIT_MAKER: &str = "LIMIT_MAKER";

// ─── RequestKind ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    Sell,
    Buy,
    PriceUpdate,
    WalletUpdate,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sell => "SELL",
            Self::Buy => "BUY",
            Self::PriceUpdate => "PRICE_UPDATE",
            Self::WalletUpdate => "WALLET_UPDATE",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Sell | Self::Buy => HttpMethod::Post,
            Self::PriceUpdate | Self::WalletUpdate => HttpMethod::Get,
        }
    }

    pub fn requires_signature(&self) -> bool {
        !matches!(self, Self::PriceUpdate)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Sell | Self::Buy => ORDER_PATH,
            Self::PriceUpdate => TICKER_PRICE_PATH,
            Self::WalletUpdate => ACCOUNT_PATH,
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// A single exchange call. Value object: built per call, never mutated.
///
/// `price` and `quantity` are written with their own scale, so
/// `Decimal::from_str("0.010")` goes on the wire as `0.010`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    Sell {
        symbol: Symbol,
        price: Decimal,
        quantity: Decimal,
    },
    Buy {
        symbol: Symbol,
        price: Decimal,
        quantity: Decimal,
    },
    PriceUpdate {
        symbol: Symbol,
    },
    WalletUpdate,
}

impl Request {
    pub fn sell(symbol: impl Into<Symbol>, price: Decimal, quantity: Decimal) -> Self {
        Self::Sell {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    pub fn buy(symbol: impl Into<Symbol>, price: Decimal, quantity: Decimal) -> Self {
        Self::Buy {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    pub fn price_update(symbol: impl Into<Symbol>) -> Self {
        Self::PriceUpdate {
            symbol: symbol.into(),
        }
    }

    pub fn wallet_update() -> Self {
        Self::WalletUpdate
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Sell { .. } => RequestKind::Sell,
            Self::Buy { .. } => RequestKind::Buy,
            Self::PriceUpdate { .. } => RequestKind::PriceUpdate,
            Self::WalletUpdate => RequestKind::WalletUpdate,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.kind().method()
    }

    pub fn requires_signature(&self) -> bool {
        self.kind().requires_signature()
    }

    /// Compose with the current wall-clock timestamp.
    pub fn compose(&self) -> ComposedRequest {
        self.compose_at(now_millis())
    }

    /// Compose with an explicit `timestamp` (milliseconds). Unsigned variants
    /// ignore it.
    pub fn compose_at(&self, timestamp_ms: u64) -> ComposedRequest {
        let kind = self.kind();
        let params = match self {
            Self::Sell {
                symbol,
                price,
                quantity,
            } => limit_maker(symbol, "SELL", price, quantity, timestamp_ms),
            Self::Buy {
                symbol,
                price,
                quantity,
            } => limit_maker(symbol, "BUY", price, quantity, timestamp_ms),
            Self::PriceUpdate { symbol } => CanonicalParams::new().push("symbol", symbol),
            Self::WalletUpdate => CanonicalParams::new().push("timestamp", timestamp_ms),
        };

        ComposedRequest {
            method: kind.method(),
            requires_signature: kind.requires_signature(),
            path: kind.path(),
            params: params.finish(),
        }
    }
}

fn limit_maker(
    symbol: &Symbol,
    side: &'static str,
    price: &Decimal,
    quantity: &Decimal,
    timestamp_ms: u64,
) -> CanonicalParams {
    CanonicalParams::new()
        .push("symbol", symbol)
        .push("side", side)
        .push("type", LIMIT_MAKER)
        .push("quantity", quantity)
        .push("price", price)
        .push("timestamp", timestamp_ms)
        .push("recvWindow", RECV_WINDOW_MS)
}

// ─── ComposedRequest ─────────────────────────────────────────────────────────

/// A request rendered for the wire, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedRequest {
    pub method: HttpMethod,
    pub requires_signature: bool,
    /// Relative path, no leading slash.
    pub path: &'static str,
    /// Canonical `key=value&...` string the signature is computed over.
    pub params: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const TS: u64 = 1_700_000_000_123;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_buy_params_exact_order() {
        let composed = Request::buy("BTCUSDT", dec("100.5"), dec("0.01")).compose_at(TS);
        assert_eq!(composed.method, HttpMethod::Post);
        assert!(composed.requires_signature);
        assert_eq!(composed.path, "api/v3/order");
        assert_eq!(
            composed.params,
            "symbol=BTCUSDT&side=BUY&type=LIMIT_MAKER&quantity=0.01&price=100.5&timestamp=1700000000123&recvWindow=15000"
        );
    }

    #[test]
    fn test_sell_params_exact_order() {
        let composed = Request::sell("ETHBTC", dec("0.05123"), dec("2")).compose_at(TS);
        assert_eq!(composed.method, HttpMethod::Post);
        assert!(composed.requires_signature);
        assert_eq!(composed.path, "api/v3/order");
        assert_eq!(
            composed.params,
            "symbol=ETHBTC&side=SELL&type=LIMIT_MAKER&quantity=2&price=0.05123&timestamp=1700000000123&recvWindow=15000"
        );
    }

    #[test]
    fn test_price_update_is_unsigned_without_timestamp() {
        let composed = Request::price_update("BTCUSDT").compose_at(TS);
        assert_eq!(composed.method, HttpMethod::Get);
        assert!(!composed.requires_signature);
        assert_eq!(composed.path, "api/v3/ticker/price");
        assert_eq!(composed.params, "symbol=BTCUSDT");
    }

    #[test]
    fn test_wallet_update_has_only_timestamp() {
        let composed = Request::wallet_update().compose_at(TS);
        assert_eq!(composed.method, HttpMethod::Get);
        assert!(composed.requires_signature);
        assert_eq!(composed.path, "api/v3/account");
        assert_eq!(composed.params, "timestamp=1700000000123");
    }

    #[test]
    fn test_decimal_scale_is_preserved() {
        let composed = Request::buy("BTCUSDT", dec("64000.10"), dec("0.000010")).compose_at(TS);
        assert!(composed.params.contains("&quantity=0.000010&"));
        assert!(composed.params.contains("&price=64000.10&"));
    }

    #[test]
    fn test_tiny_quantity_is_not_scientific() {
        let composed = Request::sell("SHIBUSDT", dec("0.00000812"), dec("1000000")).compose_at(TS);
        assert!(composed.params.contains("&price=0.00000812&"));
        assert!(!composed.params.contains('e'));
    }

    #[test]
    fn test_compose_embeds_current_timestamp() {
        let before = now_millis();
        let composed = Request::wallet_update().compose();
        let after = now_millis();

        let ts: u64 = composed
            .params
            .strip_prefix("timestamp=")
            .unwrap()
            .parse()
            .unwrap();
        assert!(before <= ts && ts <= after);
    }

    #[test]
    fn test_method_and_signature_follow_kind() {
        let cases = [
            (Request::sell("A", dec("1"), dec("1")), HttpMethod::Post, true),
            (Request::buy("A", dec("1"), dec("1")), HttpMethod::Post, true),
            (Request::price_update("A"), HttpMethod::Get, false),
            (Request::wallet_update(), HttpMethod::Get, true),
        ];
        for (request, method, signed) in cases {
            assert_eq!(request.method(), method, "{:?}", request.kind());
            assert_eq!(request.requires_signature(), signed, "{:?}", request.kind());
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RequestKind::Sell.to_string(), "SELL");
        assert_eq!(RequestKind::Buy.to_string(), "BUY");
        assert_eq!(RequestKind::PriceUpdate.to_string(), "PRICE_UPDATE");
        assert_eq!(RequestKind::WalletUpdate.to_string(), "WALLET_UPDATE");
        assert_eq!(
            serde_json::to_string(&RequestKind::PriceUpdate).unwrap(),
            r#""PRICE_UPDATE""#
        );
    }
}
