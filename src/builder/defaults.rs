//! Sentinel values and default resolution.
//!
//! Defaults are computed at build time, never at session-open time.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::engine::TransactOpts;

/// Nonce sentinel: let the engine assign the nonce.
pub const AUTO_NONCE: i64 = -1;

/// Order expiry sentinel: expire [`ORDER_EXPIRY_WINDOW`] after build time.
pub const DEFAULT_ORDER_EXPIRY: i64 = -1;

/// Auth token deadline sentinel: expire [`AUTH_TOKEN_WINDOW`] after build time.
pub const DEFAULT_AUTH_DEADLINE: i64 = 0;

pub const ORDER_EXPIRY_WINDOW: Duration = Duration::from_secs(28 * 24 * 60 * 60);

pub const AUTH_TOKEN_WINDOW: Duration = Duration::from_secs(7 * 60 * 60);

/// Options for a caller nonce. Only `-1` means "auto"; every other value,
/// negative or not, is passed through verbatim.
pub fn transact_opts(nonce: i64) -> TransactOpts {
    TransactOpts {
        nonce: (nonce != AUTO_NONCE).then_some(nonce),
    }
}

/// Order expiry in unix milliseconds.
pub fn resolve_order_expiry(order_expiry: i64, now: SystemTime) -> i64 {
    if order_expiry == DEFAULT_ORDER_EXPIRY {
        unix_millis(now + ORDER_EXPIRY_WINDOW)
    } else {
        order_expiry
    }
}

/// Auth token deadline in unix seconds.
pub fn resolve_auth_deadline(deadline: i64, now: SystemTime) -> i64 {
    if deadline == DEFAULT_AUTH_DEADLINE {
        unix_secs(now + AUTH_TOKEN_WINDOW)
    } else {
        deadline
    }
}

fn unix_millis(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as i64
}

fn unix_secs(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_nonce_sentinel() {
        assert_eq!(transact_opts(-1).nonce, None);
        assert_eq!(transact_opts(0).nonce, Some(0));
        assert_eq!(transact_opts(42).nonce, Some(42));
        // Only -1 is special.
        assert_eq!(transact_opts(-2).nonce, Some(-2));
    }

    #[test]
    fn test_order_expiry_default() {
        let now = at(1_700_000_000);
        let expected = (1_700_000_000 + 28 * 24 * 3600) * 1000;
        assert_eq!(resolve_order_expiry(-1, now), expected);
    }

    #[test]
    fn test_order_expiry_explicit() {
        let now = at(1_700_000_000);
        assert_eq!(resolve_order_expiry(1_700_000_000_000, now), 1_700_000_000_000);
        assert_eq!(resolve_order_expiry(0, now), 0);
    }

    #[test]
    fn test_auth_deadline() {
        let now = at(1_700_000_000);
        assert_eq!(resolve_auth_deadline(0, now), 1_700_000_000 + 7 * 3600);
        assert_eq!(resolve_auth_deadline(1_700_003_600, now), 1_700_003_600);
        assert_eq!(resolve_auth_deadline(-1, now), -1);
    }
}
