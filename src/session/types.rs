//! Session value object.

use std::fmt;
use std::sync::Arc;

use crate::engine::SignerClient;

/// One signing identity bound to an engine client.
///
/// The (api key slot, account index) pair is fixed at construction; a
/// different identity means a different `Session`.
pub struct Session {
    account_index: i64,
    api_key_slot: u8,
    chain_id: u32,
    endpoint: String,
    client: Arc<dyn SignerClient>,
}

impl Session {
    pub fn new(
        account_index: i64,
        api_key_slot: u8,
        chain_id: u32,
        endpoint: impl Into<String>,
        client: Arc<dyn SignerClient>,
    ) -> Self {
        Self {
            account_index,
            api_key_slot,
            chain_id,
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn account_index(&self) -> i64 {
        self.account_index
    }

    pub fn api_key_slot(&self) -> u8 {
        self.api_key_slot
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Engine client bound to this session's private key.
    pub fn client(&self) -> &dyn SignerClient {
        self.client.as_ref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account_index", &self.account_index)
            .field("api_key_slot", &self.api_key_slot)
            .field("chain_id", &self.chain_id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
