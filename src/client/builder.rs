//! Client construction from an ordered list of option patches.
//!
//! # Resolution Order
//! ```text
//! defaults (mainnet, cache on, 15s timeout, token from env snapshot)
//!     → options applied in order, first error aborts
//!     → network / primary / secondary / network config defaults
//!     → transport handle (unless injected)
//!     → alternate URL list
//!     → RpcClient (immutable)
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::client::network::{Network, NetworkConfig};
use crate::client::transport::build_http_client;
use crate::client::RpcClient;
use crate::config::env::{EnvSnapshot, ENV_RPC_TOKEN};
use crate::config::schema::{ClientConfiguration, RpcPolicy};
use crate::config::validation::{validate_network_config, validate_url};
use crate::error::Result;
use crate::health::tracker::FailureTracker;

/// Default per-request timeout for the transport handle.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A single configuration patch.
#[derive(Debug, Clone)]
pub enum ClientOption {
    Network(Network),
    Token(String),
    Headers(HashMap<String, String>),
    /// Primary (Horizon) endpoint. Resets the failover list to this URL.
    PrimaryUrl(String),
    /// Ordered failover list. The first entry becomes the primary URL.
    AlternateUrls(Vec<String>),
    /// Contract RPC endpoint.
    SecondaryUrl(String),
    /// Custom network; also sets network, primary and secondary URLs.
    NetworkConfig(NetworkConfig),
    CacheEnabled(bool),
    /// Zero disables the transport timeout.
    RequestTimeout(Duration),
    /// Use this transport handle instead of building one.
    HttpClient(reqwest::Client),
    Policy(RpcPolicy),
}

impl ClientOption {
    /// Apply this patch, returning the updated builder.
    pub fn apply(self, mut builder: ClientBuilder) -> Result<ClientBuilder> {
        match self {
            ClientOption::Network(network) => builder.network = Some(network),
            ClientOption::Token(token) => builder.token = Some(token).filter(|t| !t.is_empty()),
            ClientOption::Headers(headers) => builder.headers = headers,
            ClientOption::PrimaryUrl(url) => {
                if url.is_empty() {
                    builder.primary_url = None;
                    builder.alternate_urls = None;
                } else {
                    validate_url(&url).map_err(|e| e.context("primary URL"))?;
                    builder.alternate_urls = Some(vec![url.clone()]);
                    builder.primary_url = Some(url);
                }
            }
            ClientOption::AlternateUrls(urls) => {
                for url in &urls {
                    validate_url(url).map_err(|e| e.context("alternate URLs"))?;
                }
                if let Some(first) = urls.first() {
                    builder.primary_url = Some(first.clone());
                    builder.alternate_urls = Some(urls);
                }
            }
            ClientOption::SecondaryUrl(url) => {
                if url.is_empty() {
                    builder.secondary_url = None;
                } else {
                    validate_url(&url).map_err(|e| e.context("secondary URL"))?;
                    builder.secondary_url = Some(url);
                }
            }
            ClientOption::NetworkConfig(cfg) => {
                validate_network_config(&cfg).map_err(|e| e.context("network config"))?;
                builder.network = Some(Network::parse(&cfg.name));
                builder.primary_url = Some(cfg.primary_url.clone());
                builder.secondary_url = Some(cfg.secondary_url.clone()).filter(|u| !u.is_empty());
                builder.network_config = Some(cfg);
            }
            ClientOption::CacheEnabled(enabled) => builder.cache_enabled = enabled,
            ClientOption::RequestTimeout(timeout) => builder.request_timeout = timeout,
            ClientOption::HttpClient(client) => builder.http_client = Some(client),
            ClientOption::Policy(policy) => builder.policy = policy,
        }
        Ok(builder)
    }
}

/// Mutable construction state. Only reachable through [`ClientOption`]s.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    network: Option<Network>,
    token: Option<String>,
    primary_url: Option<String>,
    secondary_url: Option<String>,
    alternate_urls: Option<Vec<String>>,
    cache_enabled: bool,
    network_config: Option<NetworkConfig>,
    http_client: Option<reqwest::Client>,
    request_timeout: Duration,
    headers: HashMap<String, String>,
    policy: RpcPolicy,
}

impl ClientBuilder {
    /// Builder defaults. The token comes from the environment snapshot.
    pub fn new(env: &EnvSnapshot) -> Self {
        Self {
            network: Some(Network::Mainnet),
            token: env.get(ENV_RPC_TOKEN).map(str::to_string),
            primary_url: None,
            secondary_url: None,
            alternate_urls: None,
            cache_enabled: true,
            network_config: None,
            http_client: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            headers: HashMap::new(),
            policy: RpcPolicy::default(),
        }
    }

    /// Seed a builder with every field of a resolved configuration.
    ///
    /// URLs and the network config are validated again; the token falls back
    /// to the environment snapshot when the configuration has none.
    pub fn from_configuration(config: ClientConfiguration, env: &EnvSnapshot) -> Result<Self> {
        validate_network_config(&config.network_config).map_err(|e| e.context("network config"))?;
        if !config.primary_url.is_empty() {
            validate_url(&config.primary_url).map_err(|e| e.context("primary URL"))?;
        }
        for url in &config.alternate_urls {
            validate_url(url).map_err(|e| e.context("alternate URLs"))?;
        }
        if !config.secondary_url.is_empty() {
            validate_url(&config.secondary_url).map_err(|e| e.context("secondary URL"))?;
        }

        let mut builder = Self::new(env);
        builder.network = Some(config.network);
        builder.primary_url = Some(config.primary_url).filter(|u| !u.is_empty());
        builder.alternate_urls = Some(config.alternate_urls).filter(|u| !u.is_empty());
        builder.secondary_url = Some(config.secondary_url).filter(|u| !u.is_empty());
        builder.network_config = Some(config.network_config);
        builder.headers = config.headers;
        builder.cache_enabled = config.cache_enabled;
        builder.request_timeout = config.request_timeout;
        builder.policy = config.policy;
        if let Some(token) = config.token.filter(|t| !t.is_empty()) {
            builder.token = Some(token);
        }
        Ok(builder)
    }

    /// Apply `options` in order, stopping at the first error.
    pub fn apply<I>(self, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        options.into_iter().try_fold(self, |builder, option| option.apply(builder))
    }

    /// Resolve remaining defaults and produce the client.
    pub fn build(self) -> Result<RpcClient> {
        let network = self.network.unwrap_or_default();

        let mut primary_url = self.primary_url.unwrap_or_default();
        if primary_url.is_empty() && self.secondary_url.is_none() {
            primary_url = network.default_primary_url().to_string();
        }

        let secondary_url = self
            .secondary_url
            .unwrap_or_else(|| network.default_secondary_url().to_string());

        let network_config = self.network_config.unwrap_or_else(|| network.config());

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(
                self.token.as_deref(),
                &self.headers,
                self.request_timeout,
                self.policy.max_redirects,
            )?,
        };

        let mut alternate_urls = self.alternate_urls.unwrap_or_default();
        if alternate_urls.is_empty() && !primary_url.is_empty() {
            alternate_urls = vec![primary_url.clone()];
        }

        if primary_url.is_empty() {
            primary_url = network_config.primary_url.clone();
        }

        if alternate_urls.is_empty() {
            alternate_urls = vec![primary_url.clone()];
        }

        tracing::debug!(
            network = %network,
            primary_url = %primary_url,
            secondary_url = %secondary_url,
            endpoints = alternate_urls.len(),
            cache_enabled = self.cache_enabled,
            "RPC client built"
        );

        let tracker = FailureTracker::new(&self.policy);
        let config = ClientConfiguration {
            network,
            network_config,
            primary_url,
            alternate_urls,
            secondary_url,
            headers: self.headers,
            cache_enabled: self.cache_enabled,
            request_timeout: self.request_timeout,
            token: self.token,
            policy: self.policy,
        };

        Ok(RpcClient::from_parts(config, http_client, tracker))
    }
}

impl ClientConfiguration {
    /// Express a resolved configuration as builder options.
    ///
    /// Applying the result makes the head of `alternate_urls` the primary URL.
    /// A primary overridden after the failover list was set is not kept; seed
    /// a builder with [`ClientBuilder::from_configuration`] for an exact copy.
    pub fn into_options(self) -> Vec<ClientOption> {
        let mut options = vec![
            ClientOption::NetworkConfig(self.network_config),
            ClientOption::Network(self.network),
            ClientOption::SecondaryUrl(self.secondary_url),
            ClientOption::AlternateUrls(self.alternate_urls),
            ClientOption::Headers(self.headers),
            ClientOption::CacheEnabled(self.cache_enabled),
            ClientOption::RequestTimeout(self.request_timeout),
            ClientOption::Policy(self.policy),
        ];
        if let Some(token) = self.token {
            options.push(ClientOption::Token(token));
        }
        options
    }
}
