//! Configuration schema definitions.
//!
//! `RpcOptions` is the explicit, caller-supplied layer. It derives Serde traits
//! so it can come from a TOML options file as well as from code. Every field is
//! optional; unset fields fall back to the environment snapshot, then to
//! defaults. `ClientConfiguration` and `RpcPolicy` are the resolved results.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::network::{Network, NetworkConfig};
use crate::resilience::backoff::retry_delay;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;
pub const DEFAULT_CIRCUIT_BREAKER_THRESHOLD: u32 = 5;
pub const DEFAULT_CIRCUIT_BREAKER_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Explicit options, highest precedence.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcOptions {
    /// Network identifier (mainnet, testnet, futurenet or a custom name).
    pub network: Option<String>,

    /// Endpoint URLs, either a delimited string or a list.
    pub urls: Option<UrlSource>,

    /// Contract-RPC endpoint.
    pub secondary_url: Option<String>,

    /// Structured headers. Takes precedence over `headers_raw`.
    pub headers: Option<HashMap<String, String>>,

    /// Raw header string, JSON object or `k=v,k2:v2` pairs.
    pub headers_raw: Option<String>,

    /// Bearer token.
    pub token: Option<String>,

    pub cache_enabled: Option<bool>,

    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,

    pub retries: Option<u32>,

    /// Base delay between retries in milliseconds.
    pub retry_delay_ms: Option<u64>,

    /// Consecutive failures before an endpoint is suspended.
    pub circuit_breaker_threshold: Option<u32>,

    /// How long a suspended endpoint stays out of rotation, in milliseconds.
    pub circuit_breaker_timeout_ms: Option<u64>,

    pub max_redirects: Option<u32>,
}

/// A source of endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UrlSource {
    /// Comma-delimited string.
    Delimited(String),
    /// Explicit ordered list.
    List(Vec<String>),
}

impl UrlSource {
    /// True if the source carries no candidates at all.
    pub fn is_empty(&self) -> bool {
        match self {
            UrlSource::Delimited(s) => s.trim().is_empty(),
            UrlSource::List(list) => list.iter().all(|u| u.trim().is_empty()),
        }
    }
}

impl From<&str> for UrlSource {
    fn from(s: &str) -> Self {
        UrlSource::Delimited(s.to_string())
    }
}

impl From<Vec<String>> for UrlSource {
    fn from(list: Vec<String>) -> Self {
        UrlSource::List(list)
    }
}

/// Request policy shared by every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub circuit_breaker_threshold: u32,
    pub circuit_breaker_timeout: Duration,
    pub max_redirects: u32,
}

impl Default for RpcPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            circuit_breaker_threshold: DEFAULT_CIRCUIT_BREAKER_THRESHOLD,
            circuit_breaker_timeout: Duration::from_millis(DEFAULT_CIRCUIT_BREAKER_TIMEOUT_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl RpcPolicy {
    /// Delay before retry number `attempt` (1-based).
    ///
    /// Exponential from `retry_delay`, capped at `timeout`, with up to 10% jitter.
    pub fn retry_delay_for(&self, attempt: u32) -> Duration {
        retry_delay(attempt, self.retry_delay, self.timeout)
    }
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfiguration {
    pub network: Network,
    pub network_config: NetworkConfig,
    pub primary_url: String,
    /// Ordered failover list; `alternate_urls[0] == primary_url`.
    pub alternate_urls: Vec<String>,
    pub secondary_url: String,
    pub headers: HashMap<String, String>,
    pub cache_enabled: bool,
    pub request_timeout: Duration,
    pub token: Option<String>,
    pub policy: RpcPolicy,
}
