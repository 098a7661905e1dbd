//! Low-level HTTP transport: `RelayHttp`.
//!
//! One round trip per call, JSON in and out. Status codes are not interpreted:
//! the exchange answers rejections with a JSON error body and a 4xx status, and
//! that body is what the failover pass inspects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::dispatch::Transport;
use crate::error::HttpError;
use crate::network::API_KEY_HEADER;
use crate::shared::HttpMethod;

/// Longest body excerpt kept in an [`HttpError::InvalidBody`].
const BODY_EXCERPT_LEN: usize = 256;

/// `reqwest`-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct RelayHttp {
    client: Client,
}

impl RelayHttp {
    /// Build a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

#[async_trait]
impl Transport for RelayHttp {
    async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        api_key: &str,
    ) -> Result<Value, HttpError> {
        let resp = self
            .client
            .request(to_reqwest(method), url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| HttpError::Reqwest(e.without_url()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| HttpError::Reqwest(e.without_url()))?;

        tracing::trace!(status = status.as_u16(), bytes = text.len(), "Response received");

        serde_json::from_str(&text).map_err(|_| HttpError::InvalidBody {
            url: strip_query(url).to_string(),
            status: status.as_u16(),
            body: excerpt(&text),
        })
    }
}

/// The query carries the signature; keep it out of error messages.
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(to_reqwest(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest(HttpMethod::Post), Method::POST);
    }

    #[test]
    fn test_strip_query_hides_signature() {
        assert_eq!(
            strip_query("https://api.binance.com/api/v3/account?timestamp=1&signature=abc"),
            "https://api.binance.com/api/v3/account"
        );
        assert_eq!(strip_query("https://h/x"), "https://h/x");
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let long = "x".repeat(BODY_EXCERPT_LEN + 10);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), BODY_EXCERPT_LEN + 1);
        assert_eq!(excerpt("<html>"), "<html>");
    }
}
