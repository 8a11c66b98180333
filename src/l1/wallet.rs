//! EIP-191 signer for the auxiliary signature some transactions carry.

use alloy::primitives::{hex, Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use serde_json::Value;
use thiserror::Error;

use crate::envelope::MESSAGE_TO_SIGN_FIELD;

/// Environment variable name for the L1 private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "BRIDGE_L1_PRIVATE_KEY";

/// L1 signing errors.
#[derive(Debug, Error)]
pub enum L1Error {
    #[error("invalid L1 private key: {0}")]
    InvalidKey(String),

    #[error("environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("transaction document is not valid JSON: {0}")]
    Document(String),

    #[error("transaction document has no MessageToSign field")]
    NoMessage,

    #[error("invalid signature: {0}")]
    Signature(String),

    #[error("signing failed: {0}")]
    Signing(String),
}

pub type L1Result<T> = Result<T, L1Error>;

/// Signs `MessageToSign` bodies with an Ethereum key.
#[derive(Debug, Clone)]
pub struct L1Signer {
    signer: PrivateKeySigner,
}

impl L1Signer {
    /// Create a signer from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key(private_key_hex: &str) -> L1Result<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| L1Error::InvalidKey(format!("{}", e)))?;

        tracing::info!(address = %signer.address(), "L1 signer initialized");

        Ok(Self { signer })
    }

    /// Load the signer from `BRIDGE_L1_PRIVATE_KEY`.
    pub fn from_env() -> L1Result<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
            .map_err(|_| L1Error::MissingEnv(PRIVATE_KEY_ENV_VAR))?;
        Self::from_private_key(&private_key)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign `message` with the Ethereum personal-message prefix and return
    /// the 65-byte `r || s || v` signature as `0x` hex.
    pub async fn sign_message(&self, message: &str) -> L1Result<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| L1Error::Signing(e.to_string()))?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }

    /// Extract and sign the `MessageToSign` of a transaction document.
    pub async fn sign_transaction_document(&self, tx_json: &str) -> L1Result<String> {
        let message = extract_message_to_sign(tx_json)?;
        self.sign_message(&message).await
    }
}

/// Pull the `MessageToSign` string out of a serialized transaction.
pub fn extract_message_to_sign(tx_json: &str) -> L1Result<String> {
    let document: Value =
        serde_json::from_str(tx_json).map_err(|e| L1Error::Document(e.to_string()))?;
    document
        .get(MESSAGE_TO_SIGN_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(L1Error::NoMessage)
}

/// Recover the address that produced `signature_hex` over `message`.
pub fn recover_address(message: &str, signature_hex: &str) -> L1Result<Address> {
    let bytes = hex::decode(signature_hex).map_err(|e| L1Error::Signature(e.to_string()))?;
    let signature =
        Signature::try_from(bytes.as_slice()).map_err(|e| L1Error::Signature(e.to_string()))?;
    signature
        .recover_address_from_msg(message.as_bytes())
        .map_err(|e| L1Error::Signature(e.to_string()))
}
