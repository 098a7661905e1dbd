//! High-level client: `RelayClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared credential and dispatcher, and
//! the accessor methods.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::auth::Credential;
use crate::dispatch::{is_error_body, FailoverDispatcher, Transport};
use crate::domain::account::client::Account;
use crate::domain::market::client::Markets;
use crate::domain::order::client::Orders;
use crate::domain::request::Request;
use crate::error::{ApiErrorBody, RelayError};
use crate::http::RelayHttp;
use crate::logger::RequestLogger;
use crate::network::{default_endpoints, DEFAULT_TIMEOUT};

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::market::client::Markets as MarketClient;
pub use crate::domain::order::client::Orders as OrdersClient;

/// The primary entry point.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.market()`, `client.account()`.
#[derive(Clone)]
pub struct RelayClient {
    pub(crate) credential: Arc<Credential>,
    pub(crate) dispatcher: FailoverDispatcher,
    /// Audit logger; requests are not journaled when unset.
    pub(crate) logger: Option<RequestLogger>,
}

impl RelayClient {
    pub fn builder() -> RelayClientBuilder {
        RelayClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn market(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    // ── Raw access ───────────────────────────────────────────────────────

    /// Compose, sign and sweep `request` across the mirrors, then journal it.
    ///
    /// The final body is returned as-is, including an error-shaped body from
    /// the last host. Only a transport failure on the last host is an `Err`.
    pub async fn send(&self, request: &Request) -> Result<Value, RelayError> {
        let composed = request.compose();
        let outcome = self.dispatcher.dispatch(&self.credential, &composed).await;

        if let Some(logger) = &self.logger {
            if let Err(e) = logger.log_request(request).await {
                tracing::error!(kind = %request.kind(), "Failed to journal request: {}", e);
            }
        }

        Ok(outcome?)
    }

    /// Like [`send`](Self::send), but an error-shaped final body becomes
    /// [`RelayError::Api`].
    pub(crate) async fn send_checked(&self, request: &Request) -> Result<Value, RelayError> {
        let body = self.send(request).await?;
        if !is_error_body(&body) {
            return Ok(body);
        }
        match ApiErrorBody::from_response(&body) {
            Some(api_error) => Err(RelayError::Api(api_error)),
            None => Err(RelayError::Other(format!("unrecognized error body: {body}"))),
        }
    }

    pub fn endpoints(&self) -> &[String] {
        self.dispatcher.endpoints()
    }

    pub fn api_key(&self) -> &str {
        self.credential.api_key()
    }

    pub fn logger(&self) -> Option<&RequestLogger> {
        self.logger.as_ref()
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("credential", &self.credential)
            .field("endpoints", &self.dispatcher.endpoints())
            .field("logging", &self.logger.is_some())
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct RelayClientBuilder {
    api_keys: Option<(String, Vec<u8>)>,
    credentials_file: Option<PathBuf>,
    credential: Option<Credential>,
    endpoints: Vec<String>,
    timeout: Duration,
    logger: Option<RequestLogger>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for RelayClientBuilder {
    fn default() -> Self {
        Self {
            api_keys: None,
            credentials_file: None,
            credential: None,
            endpoints: default_endpoints(),
            timeout: DEFAULT_TIMEOUT,
            logger: None,
            http_client: None,
            transport: None,
        }
    }
}

impl RelayClientBuilder {
    pub fn api_keys(mut self, api_key: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Self {
        self.api_keys = Some((api_key.into(), secret_key.into()));
        self
    }

    /// Read the key pair from the first line of `path`. Takes precedence over
    /// every other credential source.
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Mirror hosts, tried in the given order.
    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Per-attempt timeout. Ignored when a custom client or transport is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn logger(mut self, logger: RequestLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the HTTP transport entirely.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<RelayClient, RelayError> {
        let credential = match (self.credentials_file, self.credential, self.api_keys) {
            (Some(path), _, _) => Credential::from_file(path)?,
            (None, Some(credential), _) => credential,
            (None, None, Some((api_key, secret_key))) => Credential::new(api_key, secret_key)?,
            (None, None, None) => {
                return Err(RelayError::config(
                    "no credentials: set api_keys, credential or credentials_file",
                ))
            }
        };

        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(RelayHttp::with_client(client)),
            (None, None) => Arc::new(RelayHttp::new(self.timeout)?),
        };

        let dispatcher = FailoverDispatcher::new(transport, self.endpoints)?;
        tracing::debug!(endpoints = dispatcher.endpoints().len(), "Relay client built");

        Ok(RelayClient {
            credential: Arc::new(credential),
            dispatcher,
            logger: self.logger,
        })
    }
}
