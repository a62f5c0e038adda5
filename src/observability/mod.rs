//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config resolution, client builder, failure tracker:
//!     → tracing events with structured fields (url, state, counts)
//!     → metrics.rs (per-endpoint counters and gauges)
//!
//! Binary startup:
//!     → logging.rs installs the subscriber (RUST_LOG aware)
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers and exporters is the
//!   embedding application's job
//! - Tokens and header values are never logged

pub mod logging;
pub mod metrics;
