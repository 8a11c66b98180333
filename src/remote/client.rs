//! HTTP client for the venue's API-key listing.
//!
//! # Responsibilities
//! - Build the lookup URL from a session endpoint
//! - Bound every request with connect and total timeouts
//! - Map transport, status and decode failures onto `RemoteError`

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::remote::types::{AccountApiKeys, RemoteConfig, RemoteError, RemoteResult};

/// Source of the API keys registered for an account.
#[async_trait]
pub trait ApiKeyDirectory: Send + Sync {
    async fn api_keys(
        &self,
        endpoint: &str,
        account_index: i64,
        api_key_slot: u8,
    ) -> RemoteResult<AccountApiKeys>;
}

/// `ApiKeyDirectory` backed by the venue's HTTP API.
#[derive(Clone)]
pub struct HttpApiKeyClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl HttpApiKeyClient {
    /// Create a client from the remote configuration.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RemoteError::Http(format!("failed to build http client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Full lookup URL for `endpoint`. The configured path is appended to
    /// any path the endpoint already has.
    pub fn lookup_url(&self, endpoint: &str) -> RemoteResult<Url> {
        let invalid = |reason: String| RemoteError::Endpoint {
            endpoint: endpoint.to_string(),
            reason,
        };
        let mut url: Url = endpoint
            .parse()
            .map_err(|e: url::ParseError| invalid(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| invalid("endpoint cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(self.config.api_keys_path.split('/').filter(|s| !s.is_empty()));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

#[async_trait]
impl ApiKeyDirectory for HttpApiKeyClient {
    async fn api_keys(
        &self,
        endpoint: &str,
        account_index: i64,
        api_key_slot: u8,
    ) -> RemoteResult<AccountApiKeys> {
        let url = self.lookup_url(endpoint)?;

        tracing::debug!(
            url = %url,
            account_index = account_index,
            api_key_slot = api_key_slot,
            "Fetching registered api keys"
        );

        let response = self
            .http
            .get(url)
            .query(&[
                ("account_index", account_index.to_string()),
                ("api_key_index", api_key_slot.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout(self.config.timeout_secs)
                } else {
                    RemoteError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Http(format!("status {}: {}", status, body)));
        }

        let keys: AccountApiKeys = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        if keys.code != 200 {
            return Err(RemoteError::Http(format!(
                "code {}: {}",
                keys.code,
                keys.message.as_deref().unwrap_or("no message")
            )));
        }

        Ok(keys)
    }
}

impl std::fmt::Debug for HttpApiKeyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiKeyClient")
            .field("api_keys_path", &self.config.api_keys_path)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
