//! Auxiliary L1 signing for `MessageToSign` bodies.
//!
//! # Data Flow
//! ```text
//! TxResult.json (Transfer / ChangePubKey)
//!     → extract_message_to_sign
//!     → L1Signer::sign_message (EIP-191 personal_sign)
//!     → 0x-prefixed 65-byte signature for the host to attach
//! ```
//!
//! # Security
//! - Keys come from a hex string or the `BRIDGE_L1_PRIVATE_KEY` variable
//! - Keys are never logged or serialized

pub mod wallet;

pub use wallet::{
    extract_message_to_sign, recover_address, L1Error, L1Result, L1Signer, PRIVATE_KEY_ENV_VAR,
};
