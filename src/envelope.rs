//! Result envelope: engine transaction → wire JSON.
//!
//! Transfer and ChangePubKey need an auxiliary off-chain signature, so their
//! documents gain a [`MESSAGE_TO_SIGN_FIELD`] holding the engine's raw
//! signature body. Every other kind is serialized unmodified.

use serde_json::Value;

use crate::engine::{SignedTransaction, TxKind};
use crate::error::{BridgeError, BridgeResult};

/// Field carrying the raw message that needs an auxiliary signature.
pub const MESSAGE_TO_SIGN_FIELD: &str = "MessageToSign";

/// Whether `kind` carries a message requiring an auxiliary signature.
pub fn requires_l1_signature(kind: TxKind) -> bool {
    matches!(kind, TxKind::Transfer | TxKind::ChangePubKey)
}

/// Serialize a signed transaction of `kind` into its wire document.
pub fn serialize(kind: TxKind, tx: &dyn SignedTransaction) -> BridgeResult<String> {
    let mut document = tx.to_document()?;

    if requires_l1_signature(kind) {
        let body = tx.l1_signature_body().ok_or_else(|| {
            BridgeError::Serialization(format!("engine returned no signature body for {}", kind))
        })?;
        match &mut document {
            Value::Object(fields) => {
                fields.insert(MESSAGE_TO_SIGN_FIELD.to_string(), Value::String(body));
            }
            other => {
                return Err(BridgeError::Serialization(format!(
                    "expected {} transaction to serialize as an object, got {}",
                    kind,
                    json_type(other)
                )));
            }
        }
    }

    Ok(serde_json::to_string(&document)?)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
