//! Order placement, grouping, modification and cancellation.

use std::time::SystemTime;

use serde::Deserialize;

use crate::builder::defaults::{resolve_order_expiry, DEFAULT_ORDER_EXPIRY};
use crate::engine::{
    CancelAllOrdersTxReq, CancelOrderTxReq, CreateGroupedOrdersTxReq, CreateOrderTxReq,
    GroupingType, ModifyOrderTxReq, TxRequest,
};
use crate::error::{BridgeResult, ValidationError};

/// Caller-facing order fields. `order_expiry` may be the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOrderParams {
    pub market_index: u8,
    pub client_order_index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub is_ask: u8,
    pub order_type: u8,
    pub time_in_force: u8,
    pub reduce_only: u8,
    pub trigger_price: u32,
    pub order_expiry: i64,
}

impl CreateOrderParams {
    fn resolve(&self, now: SystemTime) -> CreateOrderTxReq {
        CreateOrderTxReq {
            market_index: self.market_index,
            client_order_index: self.client_order_index,
            base_amount: self.base_amount,
            price: self.price,
            is_ask: self.is_ask,
            order_type: self.order_type,
            time_in_force: self.time_in_force,
            reduce_only: self.reduce_only,
            trigger_price: self.trigger_price,
            order_expiry: resolve_order_expiry(self.order_expiry, now),
        }
    }
}

/// One order of a grouped submission, as hosts send it.
///
/// Market, client index, amount, price, side, type and time-in-force are
/// required; the rest default. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderSpec {
    pub market_index: Option<u8>,
    pub client_order_index: Option<i64>,
    pub base_amount: Option<i64>,
    pub price: Option<u32>,
    pub is_ask: Option<u8>,
    #[serde(rename = "type")]
    pub order_type: Option<u8>,
    pub time_in_force: Option<u8>,
    pub reduce_only: Option<u8>,
    pub trigger_price: Option<u32>,
    pub order_expiry: Option<i64>,
}

impl From<CreateOrderParams> for OrderSpec {
    fn from(p: CreateOrderParams) -> Self {
        Self {
            market_index: Some(p.market_index),
            client_order_index: Some(p.client_order_index),
            base_amount: Some(p.base_amount),
            price: Some(p.price),
            is_ask: Some(p.is_ask),
            order_type: Some(p.order_type),
            time_in_force: Some(p.time_in_force),
            reduce_only: Some(p.reduce_only),
            trigger_price: Some(p.trigger_price),
            order_expiry: Some(p.order_expiry),
        }
    }
}

fn required<T>(value: Option<T>, index: usize, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingOrderField { index, field })
}

impl OrderSpec {
    /// Resolve into a complete order, naming the first missing field.
    pub fn resolve(&self, index: usize, now: SystemTime) -> Result<CreateOrderTxReq, ValidationError> {
        let params = CreateOrderParams {
            market_index: required(self.market_index, index, "marketIndex")?,
            client_order_index: required(self.client_order_index, index, "clientOrderIndex")?,
            base_amount: required(self.base_amount, index, "baseAmount")?,
            price: required(self.price, index, "price")?,
            is_ask: required(self.is_ask, index, "isAsk")?,
            order_type: required(self.order_type, index, "type")?,
            time_in_force: required(self.time_in_force, index, "timeInForce")?,
            reduce_only: self.reduce_only.unwrap_or(0),
            trigger_price: self.trigger_price.unwrap_or(0),
            order_expiry: self.order_expiry.unwrap_or(DEFAULT_ORDER_EXPIRY),
        };
        Ok(params.resolve(now))
    }
}

/// Parse a JSON array of [`OrderSpec`] objects.
pub fn parse_orders_json(orders_json: &str) -> Result<Vec<OrderSpec>, ValidationError> {
    serde_json::from_str(orders_json).map_err(|e| ValidationError::OrdersJson(e.to_string()))
}

pub fn create_order(params: &CreateOrderParams, now: SystemTime) -> TxRequest {
    TxRequest::CreateOrder(params.resolve(now))
}

/// Validate every order as a unit; nothing is built if any order is
/// incomplete.
pub fn create_grouped_orders(
    grouping_type: u8,
    orders: &[OrderSpec],
    now: SystemTime,
) -> BridgeResult<TxRequest> {
    let grouping_type = GroupingType::try_from(grouping_type).map_err(ValidationError::GroupingType)?;
    let orders = orders
        .iter()
        .enumerate()
        .map(|(index, spec)| spec.resolve(index, now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TxRequest::CreateGroupedOrders(CreateGroupedOrdersTxReq {
        grouping_type,
        orders,
    }))
}

pub fn cancel_order(market_index: u8, order_index: i64) -> TxRequest {
    TxRequest::CancelOrder(CancelOrderTxReq {
        market_index,
        index: order_index,
    })
}

pub fn cancel_all_orders(time_in_force: u8, time: i64) -> TxRequest {
    TxRequest::CancelAllOrders(CancelAllOrdersTxReq {
        time_in_force,
        time,
    })
}

pub fn modify_order(
    market_index: u8,
    index: i64,
    base_amount: i64,
    price: u32,
    trigger_price: u32,
) -> TxRequest {
    TxRequest::ModifyOrder(ModifyOrderTxReq {
        market_index,
        index,
        base_amount,
        price,
        trigger_price,
    })
}
