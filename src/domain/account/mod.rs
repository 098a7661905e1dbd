//! Account domain: wallet balances.

#[cfg(feature = "http")]
pub mod client;
