//! Traits the signing engine implements.

use std::sync::Arc;

use crate::engine::types::{EngineError, KeyMaterial, SessionParams, TransactOpts, TxRequest};

/// Entry point of a signing engine.
pub trait SigningEngine: Send + Sync {
    /// Sample a key pair. `None` draws a random scalar; the same seed always
    /// yields the same pair.
    fn generate_key(&self, seed: Option<&str>) -> Result<KeyMaterial, EngineError>;

    /// Bind a client to one signing identity.
    fn connect(&self, params: &SessionParams<'_>) -> Result<Arc<dyn SignerClient>, EngineError>;
}

/// Engine client bound to a private key, account and API-key slot.
pub trait SignerClient: Send + Sync {
    /// Public key derived from the bound private key.
    fn public_key(&self) -> Vec<u8>;

    /// Build and sign one transaction.
    fn sign(
        &self,
        request: &TxRequest,
        opts: &TransactOpts,
    ) -> Result<Box<dyn SignedTransaction>, EngineError>;

    /// Issue an authentication token valid until `deadline` (unix seconds).
    fn auth_token(&self, deadline: i64) -> Result<String, EngineError>;
}

/// A signed transaction returned by the engine.
pub trait SignedTransaction: Send {
    /// Serializable form of the transaction.
    fn to_document(&self) -> serde_json::Result<serde_json::Value>;

    /// Raw message requiring an auxiliary off-chain signature, if the kind
    /// has one.
    fn l1_signature_body(&self) -> Option<String>;
}
