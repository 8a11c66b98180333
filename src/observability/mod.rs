//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bridge operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges, histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Structured logging; JSON output is opt-in
//! - Key material is never logged
//! - Metrics are no-ops until the host installs a recorder

pub mod logging;
pub mod metrics;
