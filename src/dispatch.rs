//! Mirror-host failover.
//!
//! One logical call makes a single ordered pass over the endpoint list. Each
//! host gets the same (signed) URL; the pass stops at the first JSON body that
//! does not carry the error key. When every host fails, the last host's outcome
//! is returned: its error-shaped body, or its transport error.
//!
//! There is no backoff, no health tracking across calls and no parallel
//! fan-out; attempt `n + 1` starts only after attempt `n` has answered.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::Credential;
use crate::domain::request::ComposedRequest;
use crate::error::{HttpError, RelayError};
use crate::network::ERROR_KEY;
use crate::shared::HttpMethod;

/// A single HTTP round trip returning the parsed JSON body.
///
/// Implementations must send `api_key` in the `X-MBX-APIKEY` header and must
/// not treat non-2xx statuses as errors when the body is JSON; the exchange
/// reports rejections as JSON with 4xx statuses. A failed round trip that is
/// not a `reqwest` error is reported as [`HttpError::Connection`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: HttpMethod, url: &str, api_key: &str)
        -> Result<Value, HttpError>;
}

/// Whether a response body carries the error-indicator key.
pub fn is_error_body(body: &Value) -> bool {
    body.as_object()
        .is_some_and(|object| object.contains_key(ERROR_KEY))
}

/// Query string for the wire: the canonical params, plus `signature` when the
/// request is signed.
pub fn signed_query(credential: &Credential, composed: &ComposedRequest) -> String {
    if !composed.requires_signature {
        return composed.params.clone();
    }
    let signature = credential.sign(&composed.params);
    format!("{}&signature={signature}", composed.params)
}

/// Run one failover pass of `composed` over `endpoints`.
pub async fn dispatch(
    transport: &dyn Transport,
    credential: &Credential,
    endpoints: &[String],
    composed: &ComposedRequest,
) -> Result<Value, HttpError> {
    let query = signed_query(credential, composed);
    let mut outcome = Err(HttpError::NoEndpoints);

    for (attempt, host) in endpoints.iter().enumerate() {
        let url = format!("{}/{}?{}", host.trim_end_matches('/'), composed.path, query);
        tracing::debug!(
            attempt = attempt + 1,
            host = %host,
            method = %composed.method,
            path = composed.path,
            signed = composed.requires_signature,
            "Dispatching request"
        );

        outcome = transport
            .execute(composed.method, &url, credential.api_key())
            .await;

        match &outcome {
            Ok(body) if !is_error_body(body) => {
                tracing::info!(attempt = attempt + 1, host = %host, path = composed.path, "Request settled");
                break;
            }
            Ok(body) => {
                tracing::warn!(
                    host = %host,
                    code = %body[ERROR_KEY],
                    "Host rejected request, trying next mirror"
                );
            }
            Err(e) => {
                tracing::warn!(host = %host, "Transport failure, trying next mirror: {}", e);
            }
        }
    }

    outcome
}

/// Failover pass bound to a transport and a fixed endpoint list.
#[derive(Clone)]
pub struct FailoverDispatcher {
    transport: Arc<dyn Transport>,
    endpoints: Arc<[String]>,
}

impl FailoverDispatcher {
    /// Fails with [`RelayError::Config`] on an empty endpoint list.
    pub fn new(transport: Arc<dyn Transport>, endpoints: Vec<String>) -> Result<Self, RelayError> {
        if endpoints.is_empty() {
            return Err(RelayError::config("endpoint list is empty"));
        }
        if let Some(blank) = endpoints.iter().find(|host| host.trim().is_empty()) {
            return Err(RelayError::config(format!("blank endpoint {blank:?}")));
        }
        Ok(Self {
            transport,
            endpoints: endpoints.into(),
        })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub async fn dispatch(
        &self,
        credential: &Credential,
        composed: &ComposedRequest,
    ) -> Result<Value, HttpError> {
        dispatch(self.transport.as_ref(), credential, &self.endpoints, composed).await
    }
}

impl std::fmt::Debug for FailoverDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverDispatcher")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
