//! HMAC-SHA256 request signing.
//!
//! The exchange authenticates a call by the HMAC-SHA256 of its exact query
//! string (before `signature` is appended), keyed by the secret key and
//! rendered as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex HMAC-SHA256 of `params` keyed by `secret_key`.
pub fn sign(secret_key: &[u8], params: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key).expect("HMAC can take any size");
    mac.update(params.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
