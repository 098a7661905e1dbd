//! HTTP transport layer: `RelayHttp` over `reqwest`.

pub mod client;

pub use client::RelayHttp;
