//! Fault containment at the operation boundary.
//!
//! A panic anywhere below an operation becomes `BridgeError::Internal`
//! carrying the panic message; it never unwinds into the host.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;

use crate::error::{BridgeError, BridgeResult};
use crate::observability::metrics;

/// Run a synchronous operation inside the containment boundary.
pub fn contain<T>(operation: &'static str, f: impl FnOnce() -> BridgeResult<T>) -> BridgeResult<T> {
    let result = panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(internal(operation, payload)));
    observe(operation, &result);
    result
}

/// Run an asynchronous operation inside the containment boundary.
pub async fn contain_async<T>(
    operation: &'static str,
    fut: impl Future<Output = BridgeResult<T>>,
) -> BridgeResult<T> {
    let result = AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(internal(operation, payload)));
    observe(operation, &result);
    result
}

fn internal(operation: &'static str, payload: Box<dyn Any + Send>) -> BridgeError {
    let message = panic_message(&*payload);
    tracing::error!(operation = operation, message = %message, "Contained panic");
    BridgeError::Internal { operation, message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn observe<T>(operation: &'static str, result: &BridgeResult<T>) {
    match result {
        Ok(_) => {
            tracing::debug!(operation = operation, "Operation succeeded");
            metrics::record_operation(operation, None);
        }
        Err(e) => {
            tracing::warn!(
                operation = operation,
                kind = e.kind().as_str(),
                error = %e,
                "Operation failed"
            );
            metrics::record_operation(operation, Some(e.kind()));
        }
    }
}
