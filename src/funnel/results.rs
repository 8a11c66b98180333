//! Wire result shapes shared by every host binding.

use alloy::primitives::hex;
use serde::{Deserialize, Serialize};

use crate::engine::KeyMaterial;
use crate::error::BridgeResult;

/// Key generation result. An empty `error` means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairResult {
    pub private_key: String,
    pub public_key: String,
    pub error: String,
}

impl From<BridgeResult<KeyMaterial>> for KeyPairResult {
    fn from(result: BridgeResult<KeyMaterial>) -> Self {
        match result {
            Ok(keys) => Self {
                private_key: hex::encode_prefixed(&keys.private_key),
                public_key: hex::encode_prefixed(&keys.public_key),
                error: String::new(),
            },
            Err(e) => Self {
                error: e.to_string(),
                ..Self::default()
            },
        }
    }
}

/// Transaction (or auth token) result. An empty `error` means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub json: String,
    pub error: String,
}

impl TxResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }

    pub fn into_result(self) -> Result<String, String> {
        if self.is_ok() {
            Ok(self.json)
        } else {
            Err(self.error)
        }
    }
}

impl From<BridgeResult<String>> for TxResult {
    fn from(result: BridgeResult<String>) -> Self {
        match result {
            Ok(json) => Self {
                json,
                error: String::new(),
            },
            Err(e) => Self {
                json: String::new(),
                error: e.to_string(),
            },
        }
    }
}

/// Status-only result: empty on success.
pub fn error_string(result: BridgeResult<()>) -> String {
    result.err().map(|e| e.to_string()).unwrap_or_default()
}
