//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Actor loop produces:
//!     → logging.rs (structured events: loads, reload failures, shutdown)
//!     → metrics.rs (reload outcomes, key count, lookups)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (binary only)
//! ```
//!
//! # Design Decisions
//! - Reload failures are never surfaced to readers; logs and metrics are the
//!   only place they show up
//! - Lookups log at trace to keep the hot path quiet

pub mod logging;
pub mod metrics;
