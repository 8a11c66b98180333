//! The `Bridge`: every operation a host binding can call.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::builder::{self, CreateOrderParams, OrderSpec};
use crate::config::validation::validate_config;
use crate::config::{BridgeConfig, ConfigError};
use crate::engine::{KeyMaterial, SessionParams, SigningEngine, TransactOpts, TxRequest};
use crate::envelope;
use crate::error::{BridgeError, BridgeResult, StateError};
use crate::funnel::containment::{contain, contain_async};
use crate::funnel::results::{error_string, KeyPairResult, TxResult};
use crate::remote::{ApiKeyDirectory, HttpApiKeyClient};
use crate::session::{Session, SessionManager};

/// Caller-owned bridge between host bindings and a signing engine.
///
/// Holds its own session registry; nothing is process-global. Safe to
/// share across threads behind an `Arc`.
pub struct Bridge {
    engine: Arc<dyn SigningEngine>,
    directory: Arc<dyn ApiKeyDirectory>,
    sessions: SessionManager,
    config: BridgeConfig,
}

impl Bridge {
    /// Create a bridge after checking `config` with [`validate_config`].
    pub fn new(
        engine: Arc<dyn SigningEngine>,
        directory: Arc<dyn ApiKeyDirectory>,
        config: BridgeConfig,
    ) -> BridgeResult<Self> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(Self {
            engine,
            directory,
            sessions: SessionManager::new(),
            config,
        })
    }

    /// Bridge that verifies sessions against the venue's HTTP API.
    pub fn with_http_directory(
        engine: Arc<dyn SigningEngine>,
        config: BridgeConfig,
    ) -> BridgeResult<Self> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let directory = HttpApiKeyClient::new(config.remote.clone())?;
        Self::new(engine, Arc::new(directory), config)
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Sign an already shaped `request` with the active session and return
    /// its wire document. No sentinel handling happens here.
    pub fn transact(&self, request: TxRequest, opts: TransactOpts) -> BridgeResult<String> {
        contain("transact", || {
            let session = self.sessions.active()?;
            sign(&session, request, opts)
        })
    }

    // Active session is looked up before the request is built, so a missing
    // session wins over any field error.
    fn build_and_sign(
        &self,
        operation: &'static str,
        nonce: i64,
        build: impl FnOnce(SystemTime) -> BridgeResult<TxRequest>,
    ) -> TxResult {
        contain(operation, || {
            let session = self.sessions.active()?;
            let request = build(SystemTime::now())?;
            sign(&session, request, builder::transact_opts(nonce))
        })
        .into()
    }

    /// Generate a key pair. An empty seed draws a random key.
    pub fn generate_key_pair(&self, seed: &str) -> KeyPairResult {
        contain("generate_key_pair", || -> BridgeResult<KeyMaterial> {
            let seed = (!seed.is_empty()).then_some(seed);
            Ok(self.engine.generate_key(seed)?)
        })
        .into()
    }

    /// Open a session at `api_key_slot` and make it active.
    pub fn open_session(
        &self,
        endpoint: &str,
        private_key: &str,
        chain_id: u32,
        api_key_slot: u8,
        account_index: i64,
    ) -> String {
        let params = SessionParams {
            endpoint,
            private_key,
            chain_id,
            api_key_slot,
            account_index,
        };
        error_string(contain("open_session", || {
            self.sessions.open(self.engine.as_ref(), &params).map(|_| ())
        }))
    }

    /// Check the session at `api_key_slot` against the key registered remotely.
    pub async fn verify_session(&self, api_key_slot: u8, account_index: i64) -> String {
        let timeout = Duration::from_secs(self.config.remote.timeout_secs);
        error_string(
            contain_async(
                "verify_session",
                self.sessions
                    .verify(self.directory.as_ref(), api_key_slot, account_index, timeout),
            )
            .await,
        )
    }

    /// [`Bridge::verify_session`] for hosts without an async runtime.
    ///
    /// Drives the lookup on a private current-thread runtime. Calling it
    /// from inside a tokio runtime is a state error.
    pub fn verify_session_blocking(&self, api_key_slot: u8, account_index: i64) -> String {
        let verified = contain("verify_session_blocking", || {
            if tokio::runtime::Handle::try_current().is_ok() {
                return Err(StateError::InsideRuntime.into());
            }
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::Internal {
                    operation: "verify_session_blocking",
                    message: format!("failed to start runtime: {}", e),
                })?;
            Ok(runtime.block_on(self.verify_session(api_key_slot, account_index)))
        });
        verified.unwrap_or_else(|e| e.to_string())
    }

    pub fn switch_active(&self, api_key_slot: u8) -> String {
        error_string(contain("switch_active", || {
            self.sessions.switch_active(api_key_slot)
        }))
    }

    pub fn close_session(&self, api_key_slot: u8) -> String {
        error_string(contain("close_session", || self.sessions.close(api_key_slot)))
    }

    pub fn build_create_order(&self, order: CreateOrderParams, nonce: i64) -> TxResult {
        self.build_and_sign("build_create_order", nonce, |now| {
            Ok(builder::create_order(&order, now))
        })
    }

    pub fn build_create_grouped_orders(
        &self,
        grouping_type: u8,
        orders: &[OrderSpec],
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_create_grouped_orders", nonce, |now| {
            builder::create_grouped_orders(grouping_type, orders, now)
        })
    }

    /// Grouped orders for hosts that pass the order list as a JSON array.
    pub fn build_create_grouped_orders_json(
        &self,
        grouping_type: u8,
        orders_json: &str,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_create_grouped_orders", nonce, |now| {
            let orders = builder::parse_orders_json(orders_json)?;
            builder::create_grouped_orders(grouping_type, &orders, now)
        })
    }

    pub fn build_cancel_order(&self, market_index: u8, order_index: i64, nonce: i64) -> TxResult {
        self.build_and_sign("build_cancel_order", nonce, |_| {
            Ok(builder::cancel_order(market_index, order_index))
        })
    }

    pub fn build_cancel_all_orders(&self, time_in_force: u8, time: i64, nonce: i64) -> TxResult {
        self.build_and_sign("build_cancel_all_orders", nonce, |_| {
            Ok(builder::cancel_all_orders(time_in_force, time))
        })
    }

    pub fn build_modify_order(
        &self,
        market_index: u8,
        index: i64,
        base_amount: i64,
        price: u32,
        trigger_price: u32,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_modify_order", nonce, |_| {
            Ok(builder::modify_order(
                market_index,
                index,
                base_amount,
                price,
                trigger_price,
            ))
        })
    }

    pub fn build_withdraw(&self, usdc_amount: u64, nonce: i64) -> TxResult {
        self.build_and_sign("build_withdraw", nonce, |_| Ok(builder::withdraw(usdc_amount)))
    }

    /// `memo` must be exactly 32 bytes.
    pub fn build_transfer(
        &self,
        to_account_index: i64,
        usdc_amount: i64,
        fee: i64,
        memo: &str,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_transfer", nonce, |_| {
            Ok(builder::transfer(to_account_index, usdc_amount, fee, memo)?)
        })
    }

    pub fn build_create_sub_account(&self, nonce: i64) -> TxResult {
        self.build_and_sign("build_create_sub_account", nonce, |_| {
            Ok(builder::create_sub_account())
        })
    }

    /// `pub_key_hex` must decode to exactly 40 bytes.
    pub fn build_change_pub_key(&self, pub_key_hex: &str, nonce: i64) -> TxResult {
        self.build_and_sign("build_change_pub_key", nonce, |_| {
            Ok(builder::change_pub_key(pub_key_hex)?)
        })
    }

    pub fn build_create_public_pool(
        &self,
        operator_fee: i64,
        initial_total_shares: i64,
        min_operator_share_rate: i64,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_create_public_pool", nonce, |_| {
            Ok(builder::create_public_pool(
                operator_fee,
                initial_total_shares,
                min_operator_share_rate,
            ))
        })
    }

    pub fn build_update_public_pool(
        &self,
        public_pool_index: i64,
        status: u8,
        operator_fee: i64,
        min_operator_share_rate: i64,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_update_public_pool", nonce, |_| {
            Ok(builder::update_public_pool(
                public_pool_index,
                status,
                operator_fee,
                min_operator_share_rate,
            ))
        })
    }

    pub fn build_mint_shares(&self, public_pool_index: i64, share_amount: i64, nonce: i64) -> TxResult {
        self.build_and_sign("build_mint_shares", nonce, |_| {
            Ok(builder::mint_shares(public_pool_index, share_amount))
        })
    }

    pub fn build_burn_shares(&self, public_pool_index: i64, share_amount: i64, nonce: i64) -> TxResult {
        self.build_and_sign("build_burn_shares", nonce, |_| {
            Ok(builder::burn_shares(public_pool_index, share_amount))
        })
    }

    pub fn build_update_leverage(
        &self,
        market_index: u8,
        initial_margin_fraction: u16,
        margin_mode: u8,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_update_leverage", nonce, |_| {
            Ok(builder::update_leverage(
                market_index,
                initial_margin_fraction,
                margin_mode,
            ))
        })
    }

    pub fn build_update_margin(
        &self,
        market_index: u8,
        usdc_amount: i64,
        direction: u8,
        nonce: i64,
    ) -> TxResult {
        self.build_and_sign("build_update_margin", nonce, |_| {
            Ok(builder::update_margin(market_index, usdc_amount, direction))
        })
    }

    /// Auth token for the active session. `0` means seven hours from now;
    /// any other value is an absolute unix-seconds deadline. The `json`
    /// field carries the token itself.
    pub fn create_auth_token(&self, deadline: i64) -> TxResult {
        contain("create_auth_token", || {
            let session = self.sessions.active()?;
            let deadline = builder::resolve_auth_deadline(deadline, SystemTime::now());
            Ok(session.client().auth_token(deadline)?)
        })
        .into()
    }
}

fn sign(session: &Session, request: TxRequest, opts: TransactOpts) -> BridgeResult<String> {
    let kind = request.kind();
    let tx = session.client().sign(&request, &opts)?;
    let json = envelope::serialize(kind, tx.as_ref())?;

    tracing::debug!(
        kind = %kind,
        account_index = session.account_index(),
        api_key_slot = session.api_key_slot(),
        explicit_nonce = opts.nonce.is_some(),
        "Transaction signed"
    );
    Ok(json)
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
