//! Configuration resolution.
//!
//! Merges explicit options with an environment snapshot into a
//! [`ClientConfiguration`]. Options files are plain TOML mapped onto
//! [`RpcOptions`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::client::network::Network;
use crate::config::env::{
    EnvSnapshot, ENV_RPC_HEADERS, ENV_RPC_RETRIES, ENV_RPC_TIMEOUT, ENV_RPC_TOKEN, ENV_RPC_URLS,
};
use crate::config::headers::parse_headers;
use crate::config::schema::{
    ClientConfiguration, RpcOptions, RpcPolicy, UrlSource, DEFAULT_CIRCUIT_BREAKER_THRESHOLD,
    DEFAULT_CIRCUIT_BREAKER_TIMEOUT_MS, DEFAULT_MAX_REDIRECTS, DEFAULT_RETRIES,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_MS,
};
use crate::config::validation::{parse_url_list, parse_urls, validate_url};
use crate::error::{ConfigError, Result};

/// Read explicit options from a TOML file.
pub fn load_options_file(path: &Path) -> Result<RpcOptions> {
    let content = fs::read_to_string(path)?;
    let options: RpcOptions = toml::from_str(&content)?;
    Ok(options)
}

/// Resolve options and environment into a validated configuration.
///
/// Fails with a configuration error when no endpoint source yields a valid URL.
pub fn load_config(options: &RpcOptions, env: &EnvSnapshot) -> Result<ClientConfiguration> {
    let alternate_urls = resolve_urls(options, env)?;
    let primary_url = alternate_urls[0].clone();

    let network = options
        .network
        .as_deref()
        .map(Network::parse)
        .unwrap_or_default();
    let network_config = network.config();

    let secondary_url = match options.secondary_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            validate_url(url)?;
            url.to_string()
        }
        _ => network_config.secondary_url.clone(),
    };

    let policy = resolve_policy(options, env);
    let headers = resolve_headers(options, env);
    let token = options
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| env.get(ENV_RPC_TOKEN))
        .map(str::to_string);

    tracing::debug!(
        network = %network,
        primary_url = %primary_url,
        endpoints = alternate_urls.len(),
        header_count = headers.len(),
        has_token = token.is_some(),
        "RPC configuration resolved"
    );

    Ok(ClientConfiguration {
        network,
        network_config,
        primary_url,
        alternate_urls,
        secondary_url,
        headers,
        cache_enabled: options.cache_enabled.unwrap_or(true),
        request_timeout: policy.timeout,
        token,
        policy,
    })
}

fn resolve_urls(options: &RpcOptions, env: &EnvSnapshot) -> Result<Vec<String>> {
    match &options.urls {
        Some(source) if !source.is_empty() => match source {
            UrlSource::Delimited(s) => parse_urls(s),
            UrlSource::List(list) => parse_url_list(list),
        },
        _ => match env.get(ENV_RPC_URLS) {
            Some(raw) => parse_urls(raw),
            None => Err(ConfigError::configuration(format!(
                "no RPC URLs configured; set the urls option or {}",
                ENV_RPC_URLS
            ))),
        },
    }
}

fn resolve_headers(options: &RpcOptions, env: &EnvSnapshot) -> HashMap<String, String> {
    if let Some(headers) = &options.headers {
        return headers.clone();
    }
    if let Some(raw) = &options.headers_raw {
        return parse_headers(raw);
    }
    env.get(ENV_RPC_HEADERS)
        .map(parse_headers)
        .unwrap_or_default()
}

fn resolve_policy(options: &RpcOptions, env: &EnvSnapshot) -> RpcPolicy {
    let timeout_ms = options
        .timeout_ms
        .or_else(|| env.parse(ENV_RPC_TIMEOUT))
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    let retries = options
        .retries
        .or_else(|| env.parse(ENV_RPC_RETRIES))
        .unwrap_or(DEFAULT_RETRIES);

    RpcPolicy {
        timeout: Duration::from_millis(timeout_ms),
        retries,
        retry_delay: Duration::from_millis(options.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
        circuit_breaker_threshold: options
            .circuit_breaker_threshold
            .unwrap_or(DEFAULT_CIRCUIT_BREAKER_THRESHOLD),
        circuit_breaker_timeout: Duration::from_millis(
            options
                .circuit_breaker_timeout_ms
                .unwrap_or(DEFAULT_CIRCUIT_BREAKER_TIMEOUT_MS),
        ),
        max_redirects: options.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS),
    }
}
