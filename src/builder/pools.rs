//! Public pool requests.

use crate::engine::{
    BurnSharesTxReq, CreatePublicPoolTxReq, MintSharesTxReq, TxRequest, UpdatePublicPoolTxReq,
};

pub fn create_public_pool(
    operator_fee: i64,
    initial_total_shares: i64,
    min_operator_share_rate: i64,
) -> TxRequest {
    TxRequest::CreatePublicPool(CreatePublicPoolTxReq {
        operator_fee,
        initial_total_shares,
        min_operator_share_rate,
    })
}

pub fn update_public_pool(
    public_pool_index: i64,
    status: u8,
    operator_fee: i64,
    min_operator_share_rate: i64,
) -> TxRequest {
    TxRequest::UpdatePublicPool(UpdatePublicPoolTxReq {
        public_pool_index,
        status,
        operator_fee,
        min_operator_share_rate,
    })
}

pub fn mint_shares(public_pool_index: i64, share_amount: i64) -> TxRequest {
    TxRequest::MintShares(MintSharesTxReq {
        public_pool_index,
        share_amount,
    })
}

pub fn burn_shares(public_pool_index: i64, share_amount: i64) -> TxRequest {
    TxRequest::BurnShares(BurnSharesTxReq {
        public_pool_index,
        share_amount,
    })
}
