//! # spot-relay
//!
//! A signed REST client for the Binance spot API that sweeps a fixed list of
//! mirror hosts and journals every request to SQLite.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Request variants, canonical parameter strings, credentials and
//!    the HMAC signer (always available)
//! 2. **Dispatch**: `FailoverDispatcher`, one linear pass across mirror hosts
//!    over any [`dispatch::Transport`]
//! 3. **HTTP**: `RelayHttp`, the `reqwest` transport
//! 4. **Storage**: `SqliteStore` and the `RequestLogger` audit adapter
//! 5. **High-Level Client**: `RelayClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spot_relay::prelude::*;
//!
//! let store = SqliteStore::open("sqlite://logging.db").await?;
//! store.bootstrap().await?;
//!
//! let client = RelayClient::builder()
//!     .credentials_file("keys.txt")
//!     .logger(RequestLogger::new(store))
//!     .build()?;
//!
//! let ticker = client.market().price("BTCUSDT").await?;
//! let order = client.orders().buy("BTCUSDT", ticker.price, Decimal::new(1, 2)).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes: symbols, HTTP methods, clocks.
pub mod shared;

/// Request variants, wire types and their sub-clients.
pub mod domain;

/// Credentials and HMAC-SHA256 request signing.
pub mod auth;

/// Unified error types.
pub mod error;

/// Mirror hosts and protocol constants.
pub mod network;

// ── Layer 2: Dispatch ────────────────────────────────────────────────────────

/// Transport seam and the mirror-host failover pass.
pub mod dispatch;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// `reqwest`-backed transport.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Storage ─────────────────────────────────────────────────────────

/// Generic key/value storage seam and the SQLite helper.
pub mod storage;

/// Request audit logging on top of [`storage::Storage`].
pub mod logger;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `RelayClient`, the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::{HttpMethod, Symbol};

    pub use crate::domain::market::TickerPrice;
    pub use crate::domain::request::{ComposedRequest, LogRecord, Request, RequestKind};

    pub use crate::auth::{sign, Credential};

    pub use crate::error::{ApiErrorBody, HttpError, RelayError, StorageError};

    pub use crate::network::{API_KEY_HEADER, DEFAULT_ENDPOINTS, RECV_WINDOW_MS};

    pub use crate::dispatch::{FailoverDispatcher, Transport};

    pub use crate::logger::RequestLogger;
    pub use crate::storage::{Fields, Storage};
    #[cfg(feature = "sqlite")]
    pub use crate::storage::sqlite::{SortOrder, SqlValue, SqliteStore};

    #[cfg(feature = "http")]
    pub use crate::client::{
        AccountClient, MarketClient, OrdersClient, RelayClient, RelayClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::RelayHttp;

    pub use rust_decimal::Decimal;
}
