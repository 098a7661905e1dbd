//! Mirror hosts and protocol constants.

use std::time::Duration;

/// Binance spot REST mirrors, in failover order.
pub const DEFAULT_ENDPOINTS: [&str; 4] = [
    "https://api.binance.com",
    "https://api1.binance.com",
    "https://api2.binance.com",
    "https://api3.binance.com",
];

/// Header carrying the API key on every call, signed or not.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Key whose presence in a response object marks a rejected call.
pub const ERROR_KEY: &str = "code";

/// `recvWindow` sent with signed order requests.
pub const RECV_WINDOW_MS: u64 = 15_000;

/// Default per-request timeout of the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn default_endpoints() -> Vec<String> {
    DEFAULT_ENDPOINTS.iter().map(|host| host.to_string()).collect()
}
