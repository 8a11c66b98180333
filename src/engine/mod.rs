//! Signing engine contract.
//!
//! # Data Flow
//! ```text
//! Session open
//!     → SigningEngine::connect (key material, endpoint, chain id)
//!     → Arc<dyn SignerClient> held by the Session
//!
//! Transaction build
//!     → TxRequest + TransactOpts (builder)
//!     → SignerClient::sign
//!     → Box<dyn SignedTransaction> (envelope serializes it)
//! ```
//!
//! The engine owns key derivation, nonce auto-assignment and signing. This
//! crate only shapes requests for it and never inspects signatures.

pub mod contract;
pub mod types;

pub use contract::{SignedTransaction, SignerClient, SigningEngine};
pub use types::{
    BurnSharesTxReq, CancelAllOrdersTxReq, CancelOrderTxReq, ChangePubKeyTxReq,
    CreateGroupedOrdersTxReq, CreateOrderTxReq, CreatePublicPoolTxReq, EngineError,
    GroupingType, KeyMaterial, MintSharesTxReq, ModifyOrderTxReq, SessionParams,
    TransactOpts, TransferTxReq, TxKind, TxRequest, UpdateLeverageTxReq, UpdateMarginTxReq,
    UpdatePublicPoolTxReq, WithdrawTxReq,
};
