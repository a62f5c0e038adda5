//! RPC client configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Vec<ClientOption> (or ClientConfiguration from config::loader)
//!     → builder.rs (fold patches, fill network defaults)
//!     → transport.rs (reqwest::Client with token, headers, timeout)
//!     → RpcClient (immutable configuration + failure tracker)
//!     → dispatcher: select_endpoint / record_success / record_failure
//! ```
//!
//! # Design Decisions
//! - Everything but the failure tracker is immutable after build
//! - The tracker is only reachable through accessor methods
//! - `RpcClient` is `Send + Sync`; share it via `Arc`

pub mod builder;
pub mod network;
pub mod transport;

use std::collections::HashMap;
use std::time::Duration;

use crate::config::env::EnvSnapshot;
use crate::config::schema::{ClientConfiguration, RpcPolicy};
use crate::error::Result;
use crate::health::state::{CircuitState, EndpointStatus};
use crate::health::tracker::{FailureTracker, Selection};

pub use builder::{ClientBuilder, ClientOption, DEFAULT_REQUEST_TIMEOUT};
pub use network::{Network, NetworkConfig};

/// A configured client for a set of redundant RPC endpoints.
pub struct RpcClient {
    config: ClientConfiguration,
    http: reqwest::Client,
    tracker: FailureTracker,
}

impl RpcClient {
    /// Build a client from options, reading the token fallback from `env`.
    pub fn new<I>(options: I, env: &EnvSnapshot) -> Result<Self>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        ClientBuilder::new(env).apply(options)?.build()
    }

    /// Build a client from a resolved configuration, keeping every field.
    pub fn from_configuration(config: ClientConfiguration, env: &EnvSnapshot) -> Result<Self> {
        ClientBuilder::from_configuration(config, env)?.build()
    }

    pub(crate) fn from_parts(
        config: ClientConfiguration,
        http: reqwest::Client,
        tracker: FailureTracker,
    ) -> Self {
        Self { config, http, tracker }
    }

    pub fn configuration(&self) -> &ClientConfiguration {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.config.network
    }

    pub fn network_config(&self) -> &NetworkConfig {
        &self.config.network_config
    }

    pub fn primary_url(&self) -> &str {
        &self.config.primary_url
    }

    /// Failover order; the first entry is the primary URL.
    pub fn alternate_urls(&self) -> &[String] {
        &self.config.alternate_urls
    }

    pub fn secondary_url(&self) -> &str {
        &self.config.secondary_url
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.config.headers
    }

    pub fn cache_enabled(&self) -> bool {
        self.config.cache_enabled
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }

    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    pub fn policy(&self) -> &RpcPolicy {
        &self.config.policy
    }

    /// Transport handle for issuing requests.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn tracker(&self) -> &FailureTracker {
        &self.tracker
    }

    pub fn record_success(&self, url: &str) {
        self.tracker.record_success(url);
    }

    pub fn record_failure(&self, url: &str) {
        self.tracker.record_failure(url);
    }

    pub fn is_eligible(&self, url: &str) -> bool {
        self.tracker.is_eligible(url)
    }

    pub fn endpoint_state(&self, url: &str) -> CircuitState {
        self.tracker.state(url)
    }

    /// Next endpoint to use, in failover order.
    pub fn select_endpoint(&self) -> Option<Selection> {
        self.tracker.select(self.config.alternate_urls.as_slice())
    }

    /// Status of every alternate URL.
    pub fn endpoint_status(&self) -> Vec<EndpointStatus> {
        self.tracker.snapshot(self.config.alternate_urls.as_slice())
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("network", &self.config.network)
            .field("primary_url", &self.config.primary_url)
            .field("alternate_urls", &self.config.alternate_urls)
            .field("secondary_url", &self.config.secondary_url)
            .field("cache_enabled", &self.config.cache_enabled)
            .field("has_token", &self.config.token.is_some())
            .finish()
    }
}
