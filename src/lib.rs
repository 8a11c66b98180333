//! Signer bridge library.
//!
//! Exposes a fixed set of signing operations of a trading venue's signing
//! engine to foreign-language hosts: key generation, session management
//! keyed by API-key slot, and transaction construction whose results are
//! JSON documents or error strings.
//!
//! # Architecture Overview
//!
//! ```text
//!     host binding
//!          │  primitives
//!          ▼
//!     ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!     │    funnel    │───▶│   session    │───▶│    remote    │
//!     │    Bridge    │    │   registry   │    │  api keys    │
//!     └──────┬───────┘    └──────┬───────┘    └──────────────┘
//!            │                   │
//!            ▼                   ▼
//!     ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!     │   builder    │───▶│    engine    │───▶│   envelope   │
//!     │  + defaults  │    │   contract   │    │ MessageToSign│
//!     └──────────────┘    └──────────────┘    └──────────────┘
//!
//!     cross-cutting: error, config, observability, l1
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod funnel;
pub mod l1;
pub mod observability;
pub mod remote;
pub mod session;

pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use funnel::{Bridge, KeyPairResult, TxResult};
pub use session::SessionManager;
