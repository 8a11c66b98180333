//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{hex, keccak256};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use signer_bridge::config::BridgeConfig;
use signer_bridge::engine::{
    EngineError, KeyMaterial, SessionParams, SignedTransaction, SignerClient, SigningEngine,
    TransactOpts, TxKind, TxRequest,
};
use signer_bridge::remote::{AccountApiKeys, ApiKey, ApiKeyDirectory, RemoteResult};
use signer_bridge::Bridge;

pub const ENDPOINT: &str = "https://api.example.trade";
pub const CHAIN_ID: u32 = 304;
pub const KEY_A: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";
pub const KEY_B: &str = "0x2222222222222222222222222222222222222222222222222222222222222222";

/// Public key the mock engine derives for `private_key`.
pub fn public_key_for(private_key: &[u8]) -> Vec<u8> {
    let digest = keccak256(private_key);
    let mut public_key = digest.to_vec();
    public_key.extend_from_slice(&keccak256(digest)[..8]);
    public_key
}

/// A session the mock engine connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub endpoint: String,
    pub chain_id: u32,
    pub api_key_slot: u8,
    pub account_index: i64,
}

/// One signing call observed by the mock engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignCall {
    pub account_index: i64,
    pub api_key_slot: u8,
    pub request: TxRequest,
    pub opts: TransactOpts,
}

#[derive(Default)]
struct Journal {
    connections: Vec<Connection>,
    signs: Vec<SignCall>,
    auth_deadlines: Vec<i64>,
}

/// Signing engine double that records every call.
///
/// Keys are derived deterministically from the seed; an absent seed draws
/// random bytes. Every signed kind returns a signature body so callers can
/// check which kinds expose it.
#[derive(Clone, Default)]
pub struct MockEngine {
    journal: Arc<Mutex<Journal>>,
    reject: Option<(TxKind, &'static str)>,
    panic_on: Option<TxKind>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that fails signing `kind` with `message`.
    pub fn rejecting(kind: TxKind, message: &'static str) -> Self {
        Self {
            reject: Some((kind, message)),
            ..Self::default()
        }
    }

    /// Engine that panics while signing `kind`.
    pub fn panicking(kind: TxKind) -> Self {
        Self {
            panic_on: Some(kind),
            ..Self::default()
        }
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.journal.lock().unwrap().connections.clone()
    }

    pub fn signs(&self) -> Vec<SignCall> {
        self.journal.lock().unwrap().signs.clone()
    }

    pub fn last_sign(&self) -> SignCall {
        self.signs().pop().expect("no signing call recorded")
    }

    pub fn auth_deadlines(&self) -> Vec<i64> {
        self.journal.lock().unwrap().auth_deadlines.clone()
    }
}

impl SigningEngine for MockEngine {
    fn generate_key(&self, seed: Option<&str>) -> Result<KeyMaterial, EngineError> {
        let private_key = match seed {
            Some(seed) => keccak256(seed.as_bytes()).to_vec(),
            None => rand::random::<[u8; 32]>().to_vec(),
        };
        Ok(KeyMaterial {
            public_key: public_key_for(&private_key),
            private_key,
        })
    }

    fn connect(&self, params: &SessionParams<'_>) -> Result<Arc<dyn SignerClient>, EngineError> {
        let private_key =
            hex::decode(params.private_key).map_err(|e| EngineError::InvalidKey(e.to_string()))?;
        if private_key.len() != 32 {
            return Err(EngineError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                private_key.len()
            )));
        }

        self.journal.lock().unwrap().connections.push(Connection {
            endpoint: params.endpoint.to_string(),
            chain_id: params.chain_id,
            api_key_slot: params.api_key_slot,
            account_index: params.account_index,
        });

        let client: Arc<dyn SignerClient> = Arc::new(MockClient {
            engine: self.clone(),
            public_key: public_key_for(&private_key),
            account_index: params.account_index,
            api_key_slot: params.api_key_slot,
        });
        Ok(client)
    }
}

struct MockClient {
    engine: MockEngine,
    public_key: Vec<u8>,
    account_index: i64,
    api_key_slot: u8,
}

impl SignerClient for MockClient {
    fn public_key(&self) -> Vec<u8> {
        self.public_key.clone()
    }

    fn sign(
        &self,
        request: &TxRequest,
        opts: &TransactOpts,
    ) -> Result<Box<dyn SignedTransaction>, EngineError> {
        let kind = request.kind();
        if self.engine.panic_on == Some(kind) {
            panic!("engine crashed while signing {}", kind);
        }
        if let Some((rejected, message)) = self.engine.reject {
            if rejected == kind {
                return Err(EngineError::Rejected(message.to_string()));
            }
        }

        self.engine.journal.lock().unwrap().signs.push(SignCall {
            account_index: self.account_index,
            api_key_slot: self.api_key_slot,
            request: request.clone(),
            opts: *opts,
        });

        Ok(Box::new(MockTx {
            document: json!({
                "Type": kind.as_str(),
                "AccountIndex": self.account_index,
                "ApiKeyIndex": self.api_key_slot,
                "Nonce": opts.nonce,
                "Sig": hex::encode_prefixed(&self.public_key[..8]),
            }),
            body: format!("{} by account {}", kind, self.account_index),
        }))
    }

    fn auth_token(&self, deadline: i64) -> Result<String, EngineError> {
        self.engine.journal.lock().unwrap().auth_deadlines.push(deadline);
        Ok(format!("{}:{}:{}", deadline, self.account_index, self.api_key_slot))
    }
}

struct MockTx {
    document: Value,
    body: String,
}

impl SignedTransaction for MockTx {
    fn to_document(&self) -> serde_json::Result<Value> {
        Ok(self.document.clone())
    }

    fn l1_signature_body(&self) -> Option<String> {
        Some(self.body.clone())
    }
}

/// Directory answering every lookup with the same listing.
pub struct StaticDirectory {
    keys: AccountApiKeys,
    lookups: Arc<Mutex<usize>>,
}

impl StaticDirectory {
    pub fn new(keys: AccountApiKeys) -> Self {
        Self {
            keys,
            lookups: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(listing(Vec::new()))
    }

    pub fn lookups(&self) -> Arc<Mutex<usize>> {
        self.lookups.clone()
    }
}

#[async_trait]
impl ApiKeyDirectory for StaticDirectory {
    async fn api_keys(&self, _: &str, _: i64, _: u8) -> RemoteResult<AccountApiKeys> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self.keys.clone())
    }
}

pub fn listing(api_keys: Vec<ApiKey>) -> AccountApiKeys {
    AccountApiKeys {
        code: 200,
        message: None,
        api_keys,
    }
}

pub fn registered_key(account_index: i64, api_key_slot: u8, private_key: &str) -> ApiKey {
    let private_key = hex::decode(private_key).unwrap();
    ApiKey {
        account_index,
        api_key_index: api_key_slot,
        nonce: 0,
        public_key: hex::encode_prefixed(public_key_for(&private_key)),
    }
}

/// Bridge over `engine` whose directory knows nothing.
pub fn bridge(engine: &MockEngine) -> Bridge {
    bridge_with_directory(engine, StaticDirectory::empty())
}

pub fn bridge_with_directory(engine: &MockEngine, directory: StaticDirectory) -> Bridge {
    Bridge::new(
        Arc::new(engine.clone()),
        Arc::new(directory),
        BridgeConfig::default(),
    )
    .unwrap()
}

/// Bridge with a session open at `api_key_slot` for `account_index`.
pub fn open_bridge(engine: &MockEngine, api_key_slot: u8, account_index: i64) -> Bridge {
    let bridge = bridge(engine);
    let err = bridge.open_session(ENDPOINT, KEY_A, CHAIN_ID, api_key_slot, account_index);
    assert_eq!(err, "");
    bridge
}

pub fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// Returns the bound address and the request lines it received.
pub async fn start_programmable_backend<F>(f: F) -> (SocketAddr, Arc<Mutex<Vec<String>>>)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let head = read_request_head(&mut socket).await;
                        let request_line = head.lines().next().unwrap_or_default().to_string();
                        seen.lock().unwrap().push(request_line.clone());

                        let (status, body) = f(&request_line);
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// Start a backend that accepts connections and never answers.
pub async fn start_stalled_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            });
        }
    });

    addr
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
