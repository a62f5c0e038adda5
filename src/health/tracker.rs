//! Per-endpoint failure tracking.
//!
//! # Responsibilities
//! - Count consecutive failures and remember the last failure time per URL
//! - Derive circuit state from `circuit_breaker_threshold` / `circuit_breaker_timeout`
//! - Pick the next endpoint for a request in declared failover order
//!
//! # Design Decisions
//! - One `DashMap` entry per URL; every update happens under that entry's lock
//! - Entries are created lazily at zero and only ever reset, never removed
//! - A half-open probe claim expires after the circuit timeout
//! - Recording outcomes never fails

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::schema::RpcPolicy;
use crate::health::state::{CircuitState, EndpointStatus, FailureState};
use crate::observability::metrics;

/// Endpoint chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    /// True when the request is a recovery probe for a suspended endpoint.
    pub probe: bool,
}

/// Failure table shared by every request issued through a client.
#[derive(Debug)]
pub struct FailureTracker {
    states: DashMap<String, FailureState>,
    threshold: u32,
    timeout: Duration,
}

impl FailureTracker {
    /// Create a tracker using the circuit breaker settings of `policy`.
    pub fn new(policy: &RpcPolicy) -> Self {
        Self::with_limits(policy.circuit_breaker_threshold, policy.circuit_breaker_timeout)
    }

    /// Create a tracker with explicit limits. A threshold of 0 is treated as 1.
    pub fn with_limits(threshold: u32, timeout: Duration) -> Self {
        Self {
            states: DashMap::new(),
            threshold: threshold.max(1),
            timeout,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn circuit_state(&self, state: &FailureState) -> CircuitState {
        if state.consecutive_failures < self.threshold {
            return CircuitState::Closed;
        }
        match state.last_failure_at {
            Some(at) if at.elapsed() < self.timeout => CircuitState::Open,
            _ => CircuitState::HalfOpen,
        }
    }

    fn probe_pending(&self, state: &FailureState) -> bool {
        state
            .probe_claimed_at
            .is_some_and(|at| at.elapsed() < self.timeout)
    }

    /// Record a failed request to `url`.
    pub fn record_failure(&self, url: &str) {
        let (previous, failures) = {
            let mut entry = self.states.entry(url.to_string()).or_default();
            let previous = self.circuit_state(&entry);
            entry.consecutive_failures = entry.consecutive_failures.saturating_add(1);
            entry.last_failure_at = Some(Instant::now());
            entry.probe_claimed_at = None;
            (previous, entry.consecutive_failures)
        };

        metrics::record_endpoint_failure(url);

        if failures >= self.threshold && previous != CircuitState::Open {
            tracing::warn!(
                url = %url,
                consecutive_failures = failures,
                cooldown_ms = self.timeout.as_millis() as u64,
                previous = %previous,
                "Endpoint circuit opened"
            );
            metrics::record_circuit_state(url, CircuitState::Open);
        } else {
            tracing::debug!(url = %url, consecutive_failures = failures, "Endpoint failure recorded");
        }
    }

    /// Record a successful request to `url`, closing its circuit.
    ///
    /// A URL that has never failed is left untouched.
    pub fn record_success(&self, url: &str) {
        let previous = {
            let Some(mut entry) = self.states.get_mut(url) else {
                return;
            };
            let previous = self.circuit_state(&entry);
            entry.consecutive_failures = 0;
            entry.last_failure_at = None;
            entry.probe_claimed_at = None;
            previous
        };

        if previous != CircuitState::Closed {
            tracing::info!(url = %url, previous = %previous, "Endpoint circuit closed");
            metrics::record_circuit_state(url, CircuitState::Closed);
        }
    }

    /// Current circuit state of `url`.
    pub fn state(&self, url: &str) -> CircuitState {
        self.states
            .get(url)
            .map(|entry| self.circuit_state(&entry))
            .unwrap_or(CircuitState::Closed)
    }

    pub fn consecutive_failures(&self, url: &str) -> u32 {
        self.states
            .get(url)
            .map(|entry| entry.consecutive_failures)
            .unwrap_or(0)
    }

    pub fn last_failure_at(&self, url: &str) -> Option<Instant> {
        self.states.get(url).and_then(|entry| entry.last_failure_at)
    }

    /// Whether a request may be sent to `url` right now.
    ///
    /// Half-open endpoints are eligible until their probe has been handed out,
    /// and again once that claim is older than the circuit timeout.
    pub fn is_eligible(&self, url: &str) -> bool {
        let Some(entry) = self.states.get(url) else {
            return true;
        };
        match self.circuit_state(&entry) {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => !self.probe_pending(&entry),
            CircuitState::Open => false,
        }
    }

    /// Choose the endpoint for the next request.
    ///
    /// Walks `urls` in order and returns the first closed endpoint, or the
    /// first half-open endpoint whose probe slot is free (claiming it). When
    /// nothing is eligible, the endpoint with the oldest failure is returned
    /// as a probe; an open endpoint picked this way keeps its half-open slot
    /// free for the cooldown that follows. Returns `None` only for an empty
    /// list.
    pub fn select<S: AsRef<str>>(&self, urls: &[S]) -> Option<Selection> {
        for url in urls {
            let url = url.as_ref();
            let Some(mut entry) = self.states.get_mut(url) else {
                return Some(Selection { url: url.to_string(), probe: false });
            };
            match self.circuit_state(&entry) {
                CircuitState::Closed => {
                    return Some(Selection { url: url.to_string(), probe: false });
                }
                CircuitState::HalfOpen if !self.probe_pending(&entry) => {
                    entry.probe_claimed_at = Some(Instant::now());
                    metrics::record_circuit_state(url, CircuitState::HalfOpen);
                    tracing::debug!(url = %url, "Issuing half-open probe");
                    return Some(Selection { url: url.to_string(), probe: true });
                }
                _ => {}
            }
        }

        let (url, _) = urls
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|url| self.last_failure_at(url).map(|at| (url, at)))
            .min_by_key(|(_, at)| *at)?;

        if let Some(mut entry) = self.states.get_mut(url) {
            if self.circuit_state(&entry) == CircuitState::HalfOpen {
                entry.probe_claimed_at = Some(Instant::now());
            }
        }
        tracing::warn!(url = %url, "All endpoints suspended, probing the oldest failure");
        Some(Selection { url: url.to_string(), probe: true })
    }

    /// Status of each URL in `urls`, in order.
    pub fn snapshot<S: AsRef<str>>(&self, urls: &[S]) -> Vec<EndpointStatus> {
        urls.iter()
            .map(|url| {
                let url = url.as_ref();
                EndpointStatus {
                    url: url.to_string(),
                    state: self.state(url),
                    consecutive_failures: self.consecutive_failures(url),
                }
            })
            .collect()
    }
}
