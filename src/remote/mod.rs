//! Remote API-key directory.
//!
//! # Data Flow
//! ```text
//! SessionManager::verify
//!     → ApiKeyDirectory::api_keys(endpoint, account, slot)
//!         → HttpApiKeyClient: GET {endpoint}/api/v1/apikeys (request timeout)
//!     → AccountApiKeys (registered public keys)
//! ```
//!
//! # Security Constraints
//! - Only public keys cross the wire; private keys never leave the engine
//! - Every request is bounded by the configured timeout

pub mod client;
pub mod types;

pub use client::{ApiKeyDirectory, HttpApiKeyClient};
pub use types::{AccountApiKeys, ApiKey, RemoteConfig, RemoteError, RemoteResult};
