//! Request schema and value types exchanged with the signing engine.

use std::fmt;

use thiserror::Error;

/// Errors raised by the signing engine.
///
/// Messages are surfaced verbatim as the operation's error string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Key material could not be parsed or derived.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The engine refused to build or sign the request.
    #[error("{0}")]
    Rejected(String),
}

/// Every operation kind the bridge can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    CreateOrder,
    CreateGroupedOrders,
    CancelOrder,
    CancelAllOrders,
    ModifyOrder,
    Withdraw,
    Transfer,
    CreateSubAccount,
    ChangePubKey,
    CreatePublicPool,
    UpdatePublicPool,
    MintShares,
    BurnShares,
    UpdateLeverage,
    UpdateMargin,
    /// Token issuance; not a transaction and never carries a signature body.
    AuthToken,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::CreateOrder => "CreateOrder",
            TxKind::CreateGroupedOrders => "CreateGroupedOrders",
            TxKind::CancelOrder => "CancelOrder",
            TxKind::CancelAllOrders => "CancelAllOrders",
            TxKind::ModifyOrder => "ModifyOrder",
            TxKind::Withdraw => "Withdraw",
            TxKind::Transfer => "Transfer",
            TxKind::CreateSubAccount => "CreateSubAccount",
            TxKind::ChangePubKey => "ChangePubKey",
            TxKind::CreatePublicPool => "CreatePublicPool",
            TxKind::UpdatePublicPool => "UpdatePublicPool",
            TxKind::MintShares => "MintShares",
            TxKind::BurnShares => "BurnShares",
            TxKind::UpdateLeverage => "UpdateLeverage",
            TxKind::UpdateMargin => "UpdateMargin",
            TxKind::AuthToken => "AuthToken",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the orders of a grouped submission relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GroupingType {
    None = 0,
    /// One cancels the other.
    Oco = 1,
    /// One triggers the other.
    Oto = 2,
    /// One triggers a one-cancels-other pair.
    Otoco = 3,
}

impl TryFrom<u8> for GroupingType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GroupingType::None),
            1 => Ok(GroupingType::Oco),
            2 => Ok(GroupingType::Oto),
            3 => Ok(GroupingType::Otoco),
            other => Err(other),
        }
    }
}

impl From<GroupingType> for u8 {
    fn from(value: GroupingType) -> Self {
        value as u8
    }
}

/// Per-call transaction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactOpts {
    /// Explicit nonce; `None` lets the engine assign one.
    pub nonce: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderTxReq {
    pub market_index: u8,
    pub client_order_index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub is_ask: u8,
    pub order_type: u8,
    pub time_in_force: u8,
    pub reduce_only: u8,
    pub trigger_price: u32,
    /// Absolute expiry in unix milliseconds.
    pub order_expiry: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupedOrdersTxReq {
    pub grouping_type: GroupingType,
    pub orders: Vec<CreateOrderTxReq>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderTxReq {
    pub market_index: u8,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelAllOrdersTxReq {
    pub time_in_force: u8,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyOrderTxReq {
    pub market_index: u8,
    pub index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub trigger_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawTxReq {
    pub usdc_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTxReq {
    pub to_account_index: i64,
    pub usdc_amount: i64,
    pub fee: i64,
    pub memo: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePubKeyTxReq {
    pub pub_key: [u8; 40],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePublicPoolTxReq {
    pub operator_fee: i64,
    pub initial_total_shares: i64,
    pub min_operator_share_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePublicPoolTxReq {
    pub public_pool_index: i64,
    pub status: u8,
    pub operator_fee: i64,
    pub min_operator_share_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSharesTxReq {
    pub public_pool_index: i64,
    pub share_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnSharesTxReq {
    pub public_pool_index: i64,
    pub share_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLeverageTxReq {
    pub market_index: u8,
    pub initial_margin_fraction: u16,
    pub margin_mode: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMarginTxReq {
    pub market_index: u8,
    pub usdc_amount: i64,
    pub direction: u8,
}

/// A fully shaped transaction request, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxRequest {
    CreateOrder(CreateOrderTxReq),
    CreateGroupedOrders(CreateGroupedOrdersTxReq),
    CancelOrder(CancelOrderTxReq),
    CancelAllOrders(CancelAllOrdersTxReq),
    ModifyOrder(ModifyOrderTxReq),
    Withdraw(WithdrawTxReq),
    Transfer(TransferTxReq),
    CreateSubAccount,
    ChangePubKey(ChangePubKeyTxReq),
    CreatePublicPool(CreatePublicPoolTxReq),
    UpdatePublicPool(UpdatePublicPoolTxReq),
    MintShares(MintSharesTxReq),
    BurnShares(BurnSharesTxReq),
    UpdateLeverage(UpdateLeverageTxReq),
    UpdateMargin(UpdateMarginTxReq),
}

impl TxRequest {
    pub fn kind(&self) -> TxKind {
        match self {
            TxRequest::CreateOrder(_) => TxKind::CreateOrder,
            TxRequest::CreateGroupedOrders(_) => TxKind::CreateGroupedOrders,
            TxRequest::CancelOrder(_) => TxKind::CancelOrder,
            TxRequest::CancelAllOrders(_) => TxKind::CancelAllOrders,
            TxRequest::ModifyOrder(_) => TxKind::ModifyOrder,
            TxRequest::Withdraw(_) => TxKind::Withdraw,
            TxRequest::Transfer(_) => TxKind::Transfer,
            TxRequest::CreateSubAccount => TxKind::CreateSubAccount,
            TxRequest::ChangePubKey(_) => TxKind::ChangePubKey,
            TxRequest::CreatePublicPool(_) => TxKind::CreatePublicPool,
            TxRequest::UpdatePublicPool(_) => TxKind::UpdatePublicPool,
            TxRequest::MintShares(_) => TxKind::MintShares,
            TxRequest::BurnShares(_) => TxKind::BurnShares,
            TxRequest::UpdateLeverage(_) => TxKind::UpdateLeverage,
            TxRequest::UpdateMargin(_) => TxKind::UpdateMargin,
        }
    }
}

/// Raw key pair produced by the engine's scalar sampling.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key.len())
            .finish()
    }
}

/// Everything the engine needs to bind a client to one signing identity.
#[derive(Clone, Copy)]
pub struct SessionParams<'a> {
    pub endpoint: &'a str,
    pub private_key: &'a str,
    pub chain_id: u32,
    pub api_key_slot: u8,
    pub account_index: i64,
}

impl fmt::Debug for SessionParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionParams")
            .field("endpoint", &self.endpoint)
            .field("chain_id", &self.chain_id)
            .field("api_key_slot", &self.api_key_slot)
            .field("account_index", &self.account_index)
            .finish_non_exhaustive()
    }
}
