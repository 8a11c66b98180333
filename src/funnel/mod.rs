//! Public operation surface.
//!
//! # Data Flow
//! ```text
//! host binding
//!     → Bridge::<operation> (primitives in)
//!     → containment.rs (panic boundary, logging, metrics)
//!     → SessionManager (active session)
//!     → builder (validate + default) → engine → envelope
//!     → results.rs (KeyPairResult / TxResult / error string out)
//! ```
//!
//! Host bindings are thin adapters over `Bridge`: they convert arguments
//! and result shapes and contain no validation or default logic.

pub mod bridge;
pub mod containment;
pub mod results;

pub use bridge::Bridge;
pub use results::{error_string, KeyPairResult, TxResult};
