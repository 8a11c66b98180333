//! Metrics collection.
//!
//! # Metrics
//! - `bridge_operations_total` (counter): operations by name and outcome
//! - `bridge_sessions_opened_total` (counter): successful session opens
//! - `bridge_sessions_registered` (gauge): slots currently in the registry
//! - `bridge_verify_duration_seconds` (histogram): remote verification latency

use std::time::Duration;

use crate::error::ErrorKind;

/// Record the outcome of one public operation.
pub fn record_operation(operation: &'static str, outcome: Option<ErrorKind>) {
    let outcome = outcome.map(|k| k.as_str()).unwrap_or("ok");
    metrics::counter!(
        "bridge_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_session_opened(registered: usize) {
    metrics::counter!("bridge_sessions_opened_total").increment(1);
    record_sessions_registered(registered);
}

pub fn record_sessions_registered(registered: usize) {
    metrics::gauge!("bridge_sessions_registered").set(registered as f64);
}

pub fn record_verify_duration(elapsed: Duration) {
    metrics::histogram!("bridge_verify_duration_seconds").record(elapsed.as_secs_f64());
}
