//! Request construction.
//!
//! # Data Flow
//! ```text
//! host primitives
//!     → defaults.rs (nonce / expiry / deadline sentinels)
//!     → orders.rs, account.rs, pools.rs (field-shape validation)
//!     → TxRequest + TransactOpts for the signing engine
//! ```
//!
//! Builders are pure: they take the build time as an argument and never
//! touch the session registry or the engine.

pub mod account;
pub mod defaults;
pub mod orders;
pub mod pools;

pub use account::{
    change_pub_key, create_sub_account, transfer, update_leverage, update_margin, withdraw,
};
pub use defaults::{
    resolve_auth_deadline, resolve_order_expiry, transact_opts, AUTO_NONCE,
    DEFAULT_AUTH_DEADLINE, DEFAULT_ORDER_EXPIRY,
};
pub use orders::{
    cancel_all_orders, cancel_order, create_grouped_orders, create_order, modify_order,
    parse_orders_json, CreateOrderParams, OrderSpec,
};
pub use pools::{burn_shares, create_public_pool, mint_shares, update_public_pool};
