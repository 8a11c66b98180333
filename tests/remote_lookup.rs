//! API-key lookups against a live HTTP backend.

mod common;

use std::sync::Arc;

use common::*;
use signer_bridge::config::{BridgeConfig, RemoteConfig};
use signer_bridge::remote::{ApiKeyDirectory, HttpApiKeyClient, RemoteError};
use signer_bridge::Bridge;

fn listing_body(keys: Vec<signer_bridge::remote::ApiKey>) -> String {
    serde_json::to_string(&listing(keys)).unwrap()
}

#[tokio::test]
async fn test_lookup_sends_account_and_slot() {
    let body = listing_body(vec![registered_key(42, 3, KEY_A)]);
    let (addr, requests) = start_programmable_backend(move |_| (200, body.clone())).await;

    let client = HttpApiKeyClient::new(RemoteConfig::default()).unwrap();
    let keys = client
        .api_keys(&format!("http://{}", addr), 42, 3)
        .await
        .unwrap();

    assert_eq!(keys.api_keys.len(), 1);
    assert_eq!(keys.find(3).unwrap().account_index, 42);

    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /api/v1/apikeys?"), "{}", requests[0]);
    assert!(requests[0].contains("account_index=42"));
    assert!(requests[0].contains("api_key_index=3"));
}

#[tokio::test]
async fn test_lookup_maps_failures() {
    let (addr, _) = start_programmable_backend(|_| (503, "maintenance".to_string())).await;
    let client = HttpApiKeyClient::new(RemoteConfig::default()).unwrap();
    let err = client
        .api_keys(&format!("http://{}", addr), 42, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Http(ref m) if m.contains("503")), "{}", err);

    let (addr, _) = start_programmable_backend(|_| {
        (200, r#"{"code":21100,"message":"account not found"}"#.to_string())
    })
    .await;
    let err = client
        .api_keys(&format!("http://{}", addr), 42, 3)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "failed to get api keys: code 21100: account not found");

    let (addr, _) = start_programmable_backend(|_| (200, "not json".to_string())).await;
    let err = client
        .api_keys(&format!("http://{}", addr), 42, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Decode(_)), "{}", err);
}

#[tokio::test]
async fn test_verify_session_over_http() {
    let body = listing_body(vec![registered_key(42, 3, KEY_A)]);
    let (addr, requests) = start_programmable_backend(move |_| (200, body.clone())).await;
    let endpoint = format!("http://{}", addr);

    let engine = MockEngine::new();
    let bridge =
        Bridge::with_http_directory(Arc::new(engine.clone()), BridgeConfig::default()).unwrap();

    assert_eq!(bridge.open_session(&endpoint, KEY_A, CHAIN_ID, 3, 42), "");
    assert_eq!(bridge.verify_session(3, 42).await, "");

    // A different local key at the same slot is reported as a mismatch.
    assert_eq!(bridge.open_session(&endpoint, KEY_B, CHAIN_ID, 3, 42), "");
    let err = bridge.verify_session(3, 42).await;
    assert!(
        err.starts_with("private key does not match the one registered remotely"),
        "{}",
        err
    );
    assert_eq!(requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_verify_session_times_out() {
    let addr = start_stalled_backend().await;
    let endpoint = format!("http://{}", addr);

    let mut config = BridgeConfig::default();
    config.remote.timeout_secs = 1;
    config.remote.connect_timeout_secs = 1;

    let engine = MockEngine::new();
    let bridge = Bridge::with_http_directory(Arc::new(engine.clone()), config).unwrap();
    assert_eq!(bridge.open_session(&endpoint, KEY_A, CHAIN_ID, 0, 42), "");

    assert_eq!(
        bridge.verify_session(0, 42).await,
        "api key lookup timed out after 1 seconds"
    );
    // The registry is not held by the abandoned lookup.
    assert_eq!(bridge.switch_active(0), "");
    assert!(bridge.build_withdraw(5, -1).is_ok());
}
