//! Account-level requests: funds movement, keys, sub-accounts, margin.

use alloy::primitives::hex;

use crate::engine::{
    ChangePubKeyTxReq, TransferTxReq, TxRequest, UpdateLeverageTxReq, UpdateMarginTxReq,
    WithdrawTxReq,
};
use crate::error::ValidationError;

pub const MEMO_LEN: usize = 32;
pub const PUB_KEY_LEN: usize = 40;

pub fn withdraw(usdc_amount: u64) -> TxRequest {
    TxRequest::Withdraw(WithdrawTxReq { usdc_amount })
}

/// The memo's raw bytes must be exactly [`MEMO_LEN`] long.
pub fn transfer(
    to_account_index: i64,
    usdc_amount: i64,
    fee: i64,
    memo: &str,
) -> Result<TxRequest, ValidationError> {
    let memo: [u8; MEMO_LEN] = memo
        .as_bytes()
        .try_into()
        .map_err(|_| ValidationError::MemoLength(memo.len()))?;

    Ok(TxRequest::Transfer(TransferTxReq {
        to_account_index,
        usdc_amount,
        fee,
        memo,
    }))
}

pub fn create_sub_account() -> TxRequest {
    TxRequest::CreateSubAccount
}

/// `pub_key_hex` (optionally `0x`-prefixed) must decode to [`PUB_KEY_LEN`] bytes.
pub fn change_pub_key(pub_key_hex: &str) -> Result<TxRequest, ValidationError> {
    let bytes = hex::decode(pub_key_hex).map_err(|e| ValidationError::PubKeyHex(e.to_string()))?;
    let pub_key: [u8; PUB_KEY_LEN] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| ValidationError::PubKeyLength(bytes.len()))?;

    Ok(TxRequest::ChangePubKey(ChangePubKeyTxReq { pub_key }))
}

pub fn update_leverage(market_index: u8, initial_margin_fraction: u16, margin_mode: u8) -> TxRequest {
    TxRequest::UpdateLeverage(UpdateLeverageTxReq {
        market_index,
        initial_margin_fraction,
        margin_mode,
    })
}

pub fn update_margin(market_index: u8, usdc_amount: i64, direction: u8) -> TxRequest {
    TxRequest::UpdateMargin(UpdateMarginTxReq {
        market_index,
        usdc_amount,
        direction,
    })
}
