//! Endpoint metrics.
//!
//! # Metrics
//! - `rpc_endpoint_failures_total` (counter): recorded failures by url
//! - `rpc_endpoint_circuit_state` (gauge): 0=closed, 1=half_open, 2=open, by url
//! - `rpc_endpoint_probes_total` (counter): active probes by url, result
//!
//! Without an installed recorder these calls are no-ops.

use crate::health::state::CircuitState;

pub fn record_endpoint_failure(url: &str) {
    ::metrics::counter!("rpc_endpoint_failures_total", "url" => url.to_string()).increment(1);
}

/// Gauge value for a circuit state.
pub fn circuit_state_value(state: CircuitState) -> f64 {
    match state {
        CircuitState::Closed => 0.0,
        CircuitState::HalfOpen => 1.0,
        CircuitState::Open => 2.0,
    }
}

pub fn record_circuit_state(url: &str, state: CircuitState) {
    ::metrics::gauge!("rpc_endpoint_circuit_state", "url" => url.to_string())
        .set(circuit_state_value(state));
}

pub fn record_probe(url: &str, healthy: bool) {
    let result = if healthy { "success" } else { "failure" };
    ::metrics::counter!("rpc_endpoint_probes_total", "url" => url.to_string(), "result" => result)
        .increment(1);
}
