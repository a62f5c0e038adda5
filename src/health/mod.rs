//! Endpoint health subsystem.
//!
//! # Data Flow
//! ```text
//! Passive (dispatcher outcomes):
//!     request to url succeeds/fails
//!     → tracker.rs record_success / record_failure
//!     → state.rs circuit state derived on demand
//!
//! Active (active.rs, optional):
//!     one GET per alternate URL
//!     → same tracker entry points
//!
//! Selection:
//!     alternate_urls in order → skip open → first closed / free half-open
//!     → all open: probe the oldest failure
//! ```
//!
//! # Design Decisions
//! - State is per endpoint URL, not per client
//! - Thresholds come from `RpcPolicy`, fixed for the client's lifetime

pub mod active;
pub mod state;
pub mod tracker;

pub use active::{EndpointProber, ProbeOutcome};
pub use state::{CircuitState, EndpointStatus};
pub use tracker::{FailureTracker, Selection};
