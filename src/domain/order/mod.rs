//! Order domain: LIMIT_MAKER buys and sells.
//!
//! The request shapes live on [`Request::Buy`](crate::domain::request::Request::Buy)
//! and [`Request::Sell`](crate::domain::request::Request::Sell); this slice only
//! adds the sub-client.

#[cfg(feature = "http")]
pub mod client;
