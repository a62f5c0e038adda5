//! Resilience helpers shared with the request dispatcher.
//!
//! # Data Flow
//! ```text
//! Dispatcher request fails:
//!     → health::tracker (record failure, maybe open circuit)
//!     → backoff.rs (how long to wait before the next attempt)
//!     → health::tracker::select (next eligible endpoint)
//! ```
//!
//! Retry loops belong to the caller; this module only computes
//! the schedule from `RpcPolicy`.

pub mod backoff;
