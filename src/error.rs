//! Error taxonomy shared by every bridge operation.
//!
//! Display strings double as the wire `error` field handed back to host
//! bindings, so they are stable and name the failing stage.

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::remote::RemoteError;

/// Coarse classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied shape is wrong; detected before any engine call.
    Validation,
    /// Operation invoked in a state that forbids it.
    State,
    /// Signing engine or remote lookup rejected the request.
    Engine,
    /// Engine result could not be turned into the wire document.
    Serialization,
    /// Unanticipated fault contained at the operation boundary.
    Internal,
}

impl ErrorKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::State => "state",
            ErrorKind::Engine => "engine",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Caller input rejected before reaching the signing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid account index {0}; must be greater than 0")]
    InvalidAccountIndex(i64),

    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("memo expected to be 32 bytes long, got {0}")]
    MemoLength(usize),

    #[error("invalid pub key hex: {0}")]
    PubKeyHex(String),

    #[error("invalid pub key length. expected 40 but got {0}")]
    PubKeyLength(usize),

    #[error("invalid grouping type {0}; expected 0 (none), 1 (oco), 2 (oto) or 3 (otoco)")]
    GroupingType(u8),

    #[error("order {index}: {field} is required")]
    MissingOrderField { index: usize, field: &'static str },

    #[error("failed to parse orders JSON: {0}")]
    OrdersJson(String),
}

/// Registry state forbids the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no active session; open one first")]
    NoActiveSession,

    #[error("no session registered for api key slot {0}")]
    UnknownSlot(u8),

    #[error("api key slot does not match. expected {expected} but got {actual}")]
    SlotMismatch { expected: u8, actual: u8 },

    #[error("account index does not match. expected {expected} but got {actual}")]
    AccountMismatch { expected: i64, actual: i64 },

    #[error("blocking verification called inside an async runtime; await verify_session instead")]
    InsideRuntime,
}

/// Any failure surfaced by a bridge operation.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A panic caught at the operation boundary, with its payload text.
    #[error("internal fault in {operation}: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Validation(_) | BridgeError::Config(_) => ErrorKind::Validation,
            BridgeError::State(_) => ErrorKind::State,
            BridgeError::Engine(_) | BridgeError::Remote(_) => ErrorKind::Engine,
            BridgeError::Serialization(_) => ErrorKind::Serialization,
            BridgeError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Serialization(e.to_string())
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
