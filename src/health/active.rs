//! Active endpoint probing.
//!
//! # Responsibilities
//! - Send one GET to each alternate URL through the client's transport handle
//! - Feed the outcome into the client's failure tracker

use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::time;

use crate::client::RpcClient;
use crate::health::state::CircuitState;
use crate::observability::metrics;

/// Result of probing one endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub url: String,
    pub healthy: bool,
    /// HTTP status, if a response arrived.
    pub status: Option<u16>,
    pub latency_ms: u64,
    pub error: Option<String>,
    /// Circuit state after the outcome was recorded.
    pub state: CircuitState,
}

/// Probes every endpoint of a client once.
pub struct EndpointProber<'a> {
    client: &'a RpcClient,
    timeout: Duration,
}

impl<'a> EndpointProber<'a> {
    /// Uses the client's policy timeout as the per-probe deadline.
    pub fn new(client: &'a RpcClient) -> Self {
        Self {
            client,
            timeout: client.policy().timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe all alternate URLs in failover order.
    pub async fn probe_all(&self) -> Vec<ProbeOutcome> {
        let mut outcomes = Vec::with_capacity(self.client.alternate_urls().len());
        for url in self.client.alternate_urls() {
            outcomes.push(self.probe(url).await);
        }
        outcomes
    }

    /// Probe a single URL and record the result.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let started = Instant::now();
        let request = self.client.http_client().get(url).send();

        let (healthy, status, error) = match time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => {
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(url = %url, status = %status, "Endpoint probe failed: non-success status");
                }
                (status.is_success(), Some(status.as_u16()), None)
            }
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Endpoint probe failed: request error");
                (false, None, Some(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "Endpoint probe failed: timeout");
                (false, None, Some("timeout".to_string()))
            }
        };

        if healthy {
            self.client.record_success(url);
        } else {
            self.client.record_failure(url);
        }
        metrics::record_probe(url, healthy);

        ProbeOutcome {
            url: url.to_string(),
            healthy,
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            error,
            state: self.client.endpoint_state(url),
        }
    }
}
