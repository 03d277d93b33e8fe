//! BlockCypher-compatible block explorer client.
//!
//! Two endpoints are used:
//! - `GET {base}/v1/btc/{chain}/addrs/{address}/full` for transaction history
//! - `GET {base}/v1/btc/{chain}/addrs/{address}/balance` for the balance
//!
//! Every call is a single request. Failures are returned to the caller, never
//! retried and never swallowed.

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::payment::TransactionRecord;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Body of the `/full` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressFull {
    /// Transactions in provider order.
    #[serde(default)]
    pub txs: Vec<TransactionRecord>,
    /// Set when the provider truncated the history.
    #[serde(default, rename = "hasMore")]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
struct AddressBalance {
    balance: u64,
}

/// HTTP client for the transaction-history provider.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ExplorerClient {
    /// Create a client from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the timeout is zero or the HTTP client
    /// cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(Error::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("satwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// The provider configuration in use.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// URL of an address endpoint, without query parameters.
    #[must_use]
    pub fn address_url(&self, address: &str, endpoint: &str) -> String {
        format!(
            "{}/v1/btc/{}/addrs/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.network.path_segment(),
            address,
            endpoint
        )
    }

    /// Fetch the full transaction history of `address`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProviderUnavailable` on transport failure or a non-2xx
    /// status, and `Error::MalformedResponse` if the body has the wrong shape.
    pub async fn address_full(&self, address: &str) -> Result<AddressFull> {
        let full: AddressFull = self.get_json(address, "full", true).await?;
        if full.has_more {
            warn!(
                "Provider truncated history for {} at {} transactions",
                address,
                full.txs.len()
            );
        }
        Ok(full)
    }

    /// Fetch the confirmed balance of `address` in satoshis.
    ///
    /// # Errors
    ///
    /// Same as [`ExplorerClient::address_full`].
    pub async fn address_balance(&self, address: &str) -> Result<u64> {
        let body: AddressBalance = self.get_json(address, "balance", false).await?;
        debug!("Balance of {}: {} satoshis", address, body.balance);
        Ok(body.balance)
    }

    fn query_params(&self, with_limit: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if with_limit {
            if let Some(limit) = self.config.limit {
                params.push(("limit", limit.to_string()));
            }
        }
        if let Some(token) = &self.config.token {
            params.push(("token", token.clone()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        address: &str,
        endpoint: &str,
        with_limit: bool,
    ) -> Result<T> {
        let url = self.address_url(address, endpoint);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(with_limit))
            .send()
            .await
            .map_err(|e| {
                // The URL may carry the API token.
                let e = e.without_url();
                warn!("Request to {} failed: {}", url, e);
                Error::ProviderUnavailable(format!("request to {url} failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Provider returned HTTP {} for {}", status, url);
            return Err(Error::ProviderUnavailable(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!("Reading body from {} failed: {}", url, e);
            Error::ProviderUnavailable(format!("reading body from {url} failed: {e}"))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected body from {}: {}", url, e);
            Error::MalformedResponse(format!("{url}: {e}"))
        })
    }
}
