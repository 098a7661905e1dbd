//! Account sub-client.

use serde_json::Value;

use crate::client::RelayClient;
use crate::domain::request::Request;
use crate::error::RelayError;

/// Sub-client for account queries.
pub struct Account<'a> {
    pub(crate) client: &'a RelayClient,
}

impl<'a> Account<'a> {
    /// Signed `GET api/v3/account`: balances and permissions.
    pub async fn wallet(&self) -> Result<Value, RelayError> {
        self.client.send_checked(&Request::wallet_update()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::RelayClient;
    use crate::dispatch::tests::ScriptedTransport;
    use crate::shared::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_wallet_is_signed_get() {
        let transport = ScriptedTransport::new(vec![
            Ok(json!({"code": -1021, "msg": "Timestamp outside recvWindow."})),
            Ok(json!({"balances": [{"asset": "BTC", "free": "0.1", "locked": "0"}]})),
        ]);
        let client = RelayClient::builder()
            .api_keys("key", "secret")
            .endpoints(["https://h1.test", "https://h2.test"])
            .transport(transport.clone())
            .build()
            .unwrap();

        let wallet = client.account().wallet().await.unwrap();

        assert_eq!(wallet["balances"][0]["asset"], "BTC");
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, HttpMethod::Get);
        assert!(calls[1].1.starts_with("https://h2.test/api/v3/account?timestamp="));
        assert!(calls[1].1.contains("&signature="));
        assert!(!calls[1].1.contains("recvWindow"));
    }
}
