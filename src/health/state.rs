//! Endpoint circuit state.
//!
//! # States
//! - Closed: endpoint receives traffic
//! - Open: endpoint skipped during selection
//! - HalfOpen: cooldown elapsed, one probe request allowed
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive failures >= circuit_breaker_threshold
//! Open → HalfOpen: circuit_breaker_timeout elapsed since last failure
//! HalfOpen → Closed: probe succeeds (failures reset)
//! HalfOpen → Open: probe fails (window restarts at the new failure)
//! ```
//!
//! A half-open probe claim lapses after `circuit_breaker_timeout`, so a probe
//! whose outcome is never reported does not keep the endpoint out of rotation.
//!
//! The state is never stored; it is derived from the failure count and the
//! last failure time whenever it is asked for.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

/// Circuit state of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        };
        f.write_str(s)
    }
}

/// Failure bookkeeping for one endpoint.
#[derive(Debug, Clone, Default)]
pub(crate) struct FailureState {
    pub consecutive_failures: u32,
    pub last_failure_at: Option<Instant>,
    /// When the outstanding half-open probe was handed out.
    pub probe_claimed_at: Option<Instant>,
}

/// Serializable per-endpoint status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointStatus {
    pub url: String,
    pub state: CircuitState,
    pub consecutive_failures: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(CircuitState::HalfOpen.to_string(), "half_open");
        assert_eq!(
            serde_json::to_string(&CircuitState::HalfOpen).unwrap(),
            "\"half_open\""
        );
    }

    #[test]
    fn test_failure_state_starts_at_zero() {
        let state = FailureState::default();
        assert_eq!(state.consecutive_failures, 0);
        assert!(state.last_failure_at.is_none());
        assert!(state.probe_claimed_at.is_none());
    }
}
