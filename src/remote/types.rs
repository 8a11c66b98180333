//! Remote lookup types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::config::schema::RemoteConfig;

/// Errors from the remote API-key lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Endpoint could not be turned into a request URL.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },

    /// Transport failure or non-success response.
    #[error("failed to get api keys: {0}")]
    Http(String),

    /// Lookup did not complete in time.
    #[error("api key lookup timed out after {0} seconds")]
    Timeout(u64),

    /// Response body or public key could not be decoded.
    #[error("failed to decode api key response: {0}")]
    Decode(String),

    /// The service has no key for this account and slot.
    #[error("no api key registered for account {account_index} at slot {api_key_slot}")]
    NotRegistered { account_index: i64, api_key_slot: u8 },

    /// The registered key differs from the session's key.
    #[error("private key does not match the one registered remotely. own public key: {local}, registered public key: {remote}")]
    KeyMismatch { local: String, remote: String },
}

/// Result type for remote lookups.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// One registered API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub account_index: i64,
    pub api_key_index: u8,
    #[serde(default)]
    pub nonce: i64,
    /// Hex-encoded public key, with or without `0x`.
    pub public_key: String,
}

/// Response of the API-key listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountApiKeys {
    #[serde(default = "default_code")]
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

fn default_code() -> i32 {
    200
}

impl AccountApiKeys {
    /// The record registered at `api_key_slot`, if any.
    pub fn find(&self, api_key_slot: u8) -> Option<&ApiKey> {
        self.api_keys.iter().find(|k| k.api_key_index == api_key_slot)
    }
}
