//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, connect within total)
//! - Check the log filter directive parses
//!
//! Returns all validation errors, not just the first.

use tracing_subscriber::EnvFilter;

use crate::config::schema::BridgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();
    let remote = &config.remote;

    if remote.timeout_secs == 0 {
        issues.push(ConfigIssue {
            field: "remote.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }
    if remote.connect_timeout_secs == 0 {
        issues.push(ConfigIssue {
            field: "remote.connect_timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }
    if remote.connect_timeout_secs > remote.timeout_secs {
        issues.push(ConfigIssue {
            field: "remote.connect_timeout_secs",
            message: format!(
                "{} exceeds total timeout {}",
                remote.connect_timeout_secs, remote.timeout_secs
            ),
        });
    }
    if !remote.api_keys_path.starts_with('/') {
        issues.push(ConfigIssue {
            field: "remote.api_keys_path",
            message: format!("'{}' must start with '/'", remote.api_keys_path),
        });
    }
    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        issues.push(ConfigIssue {
            field: "observability.log_level",
            message: e.to_string(),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
