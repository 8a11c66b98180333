//! Caller-owned session registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use alloy::primitives::hex;
use url::Url;

use crate::engine::{SessionParams, SigningEngine};
use crate::error::{BridgeResult, StateError, ValidationError};
use crate::observability::metrics;
use crate::remote::{ApiKeyDirectory, RemoteError};
use crate::session::types::Session;

#[derive(Default)]
struct Registry {
    sessions: HashMap<u8, Arc<Session>>,
    active: Option<u8>,
}

/// Table of API-key slot → session plus the active slot.
///
/// Every read/modify sequence runs under one lock, so concurrent callers
/// never observe a half-updated registry.
#[derive(Default)]
pub struct SessionManager {
    inner: RwLock<Registry>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers replace whole entries, so a poisoned lock still guards a
    // consistent table.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a session and make it active.
    ///
    /// Overwrites any session already registered at the same slot. On
    /// failure the registry is left untouched.
    pub fn open(
        &self,
        engine: &dyn SigningEngine,
        params: &SessionParams<'_>,
    ) -> BridgeResult<Arc<Session>> {
        if params.account_index <= 0 {
            return Err(ValidationError::InvalidAccountIndex(params.account_index).into());
        }
        if let Err(e) = Url::parse(params.endpoint) {
            return Err(ValidationError::InvalidEndpoint {
                endpoint: params.endpoint.to_string(),
                reason: e.to_string(),
            }
            .into());
        }

        // Key derivation happens outside the lock.
        let client = engine.connect(params)?;
        let session = Arc::new(Session::new(
            params.account_index,
            params.api_key_slot,
            params.chain_id,
            params.endpoint,
            client,
        ));

        let registered = {
            let mut registry = self.write();
            let replaced = registry
                .sessions
                .insert(params.api_key_slot, session.clone())
                .is_some();
            registry.active = Some(params.api_key_slot);
            if replaced {
                tracing::info!(api_key_slot = params.api_key_slot, "Replacing session at slot");
            }
            registry.sessions.len()
        };

        metrics::record_session_opened(registered);
        tracing::info!(
            account_index = params.account_index,
            api_key_slot = params.api_key_slot,
            chain_id = params.chain_id,
            endpoint = %params.endpoint,
            "Session opened"
        );

        Ok(session)
    }

    /// Make an already opened slot the active one.
    pub fn switch_active(&self, api_key_slot: u8) -> BridgeResult<()> {
        let mut registry = self.write();
        if !registry.sessions.contains_key(&api_key_slot) {
            return Err(StateError::UnknownSlot(api_key_slot).into());
        }
        registry.active = Some(api_key_slot);
        drop(registry);

        tracing::info!(api_key_slot = api_key_slot, "Active session switched");
        Ok(())
    }

    /// Remove a slot. Closing the active slot leaves no active session.
    pub fn close(&self, api_key_slot: u8) -> BridgeResult<()> {
        let mut registry = self.write();
        if registry.sessions.remove(&api_key_slot).is_none() {
            return Err(StateError::UnknownSlot(api_key_slot).into());
        }
        let was_active = registry.active == Some(api_key_slot);
        if was_active {
            registry.active = None;
        }
        let registered = registry.sessions.len();
        drop(registry);

        metrics::record_sessions_registered(registered);
        tracing::info!(
            api_key_slot = api_key_slot,
            was_active = was_active,
            "Session closed"
        );
        Ok(())
    }

    /// The session builders sign with.
    pub fn active(&self) -> BridgeResult<Arc<Session>> {
        let registry = self.read();
        registry
            .active
            .and_then(|slot| registry.sessions.get(&slot).cloned())
            .ok_or_else(|| StateError::NoActiveSession.into())
    }

    /// The session registered at `api_key_slot`.
    pub fn session(&self, api_key_slot: u8) -> BridgeResult<Arc<Session>> {
        self.read()
            .sessions
            .get(&api_key_slot)
            .cloned()
            .ok_or_else(|| StateError::UnknownSlot(api_key_slot).into())
    }

    pub fn active_slot(&self) -> Option<u8> {
        self.read().active
    }

    /// Registered slots in ascending order.
    pub fn slots(&self) -> Vec<u8> {
        let mut slots: Vec<u8> = self.read().sessions.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    pub fn len(&self) -> usize {
        self.read().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().sessions.is_empty()
    }

    /// Check that the key registered remotely for `account_index` at
    /// `api_key_slot` is this session's key.
    ///
    /// The lookup runs without holding the registry lock and is abandoned
    /// after `timeout`.
    pub async fn verify(
        &self,
        directory: &dyn ApiKeyDirectory,
        api_key_slot: u8,
        account_index: i64,
        timeout: Duration,
    ) -> BridgeResult<()> {
        let session = self.session(api_key_slot)?;

        if session.api_key_slot() != api_key_slot {
            return Err(StateError::SlotMismatch {
                expected: session.api_key_slot(),
                actual: api_key_slot,
            }
            .into());
        }
        if session.account_index() != account_index {
            return Err(StateError::AccountMismatch {
                expected: session.account_index(),
                actual: account_index,
            }
            .into());
        }

        let started = Instant::now();
        let lookup = directory.api_keys(session.endpoint(), account_index, api_key_slot);
        let keys = tokio::time::timeout(timeout, lookup)
            .await
            .map_err(|_| RemoteError::Timeout(timeout.as_secs()))??;
        metrics::record_verify_duration(started.elapsed());

        let registered = keys.find(api_key_slot).ok_or(RemoteError::NotRegistered {
            account_index,
            api_key_slot,
        })?;
        let remote_key = hex::decode(&registered.public_key).map_err(|e| {
            RemoteError::Decode(format!(
                "public key '{}' is not hex: {}",
                registered.public_key, e
            ))
        })?;

        let local_key = session.client().public_key();
        if remote_key != local_key {
            return Err(RemoteError::KeyMismatch {
                local: hex::encode_prefixed(&local_key),
                remote: hex::encode_prefixed(&remote_key),
            }
            .into());
        }

        tracing::info!(
            account_index = account_index,
            api_key_slot = api_key_slot,
            "Session key matches registered api key"
        );
        Ok(())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        f.debug_struct("SessionManager")
            .field("slots", &registry.sessions.len())
            .field("active", &registry.active)
            .finish()
    }
}
