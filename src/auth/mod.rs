//! Authentication: API credentials and request signing.
//!
//! ## Security Model
//!
//! - The secret key lives in a [`SecretSlice`] and is zeroed when the
//!   [`Credential`] is dropped. It is never exposed through a public accessor;
//!   the only way to use it is [`Credential::sign`].
//! - `Debug` output redacts the secret.
//! - The API key is not secret: it travels in the `X-MBX-APIKEY` header of every
//!   call.

pub mod signer;

pub use signer::sign;

use std::path::Path;

use secrecy::{ExposeSecret, SecretSlice};

use crate::error::{RelayError, Result};

/// Exchange API credentials. Immutable once loaded.
pub struct Credential {
    api_key: String,
    secret_key: SecretSlice<u8>,
}

impl Credential {
    /// Build a credential from in-memory keys.
    ///
    /// Fails with [`RelayError::Config`] if either key is empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();
        if api_key.trim().is_empty() {
            return Err(RelayError::config("API key is empty"));
        }
        if secret_key.is_empty() {
            return Err(RelayError::config("secret key is empty"));
        }
        Ok(Self {
            api_key,
            secret_key: SecretSlice::from(secret_key),
        })
    }

    /// Read credentials from a key file.
    ///
    /// The first line holds the API key then the secret key, separated by
    /// whitespace. The secret token is used as raw bytes.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RelayError::config(format!("cannot read key file {}: {e}", path.display()))
        })?;
        Self::parse(&contents)
            .map_err(|e| RelayError::config(format!("key file {}: {e}", path.display())))
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        let line = contents.lines().next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        let (Some(api_key), Some(secret_key)) = (tokens.next(), tokens.next()) else {
            return Err("expected `<api key> <secret key>` on the first line".to_string());
        };
        Self::new(api_key, secret_key.as_bytes()).map_err(|e| match e {
            RelayError::Config(message) => message,
            other => other.to_string(),
        })
    }

    /// The API key sent in the `X-MBX-APIKEY` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a canonical parameter string with the secret key.
    pub fn sign(&self, params: &str) -> String {
        sign(self.secret_key.expose_secret(), params)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
