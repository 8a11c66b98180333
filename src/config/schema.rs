//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Remote API-key lookup settings.
    pub remote: RemoteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote API-key lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Total lookup timeout in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Path of the API-key listing, joined onto the session endpoint.
    pub api_keys_path: String,

    /// User agent sent with lookups.
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            api_keys_path: "/api/v1/apikeys".to_string(),
            user_agent: concat!("signer-bridge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error, or per-target).
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BridgeConfig = toml::from_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.remote.api_keys_path, "/api/v1/apikeys");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_partial_override() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [remote]
            timeout_secs = 3

            [observability]
            json_logs = true
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.timeout_secs, 3);
        assert_eq!(config.remote.connect_timeout_secs, 5);
        assert!(config.observability.json_logs);
        assert_eq!(config.observability.log_level, "info");
    }
}
