//! Endpoint URL and network configuration validation.
//!
//! # Responsibilities
//! - Scheme check for endpoint URLs (absolute http/https only)
//! - Lenient parsing of candidate URL lists (drop invalid, keep the rest)
//! - Strict checks for single explicitly supplied URLs
//! - Network configuration completeness
//!
//! # Design Decisions
//! - A list is usable as long as one entry survives; invalid entries are logged
//! - A single URL is all-or-nothing and fails with a validation error
//! - Validation is pure: no I/O, no DNS

use url::Url;

use crate::client::network::NetworkConfig;
use crate::error::{ConfigError, Result};

/// Returns true if `s` is an absolute URL with an `http` or `https` scheme.
pub fn is_valid_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Strict check for a single explicitly supplied URL.
pub fn validate_url(s: &str) -> Result<()> {
    let url = Url::parse(s)
        .map_err(|e| ConfigError::validation(format!("invalid URL '{}': {}", s, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::validation(format!(
            "invalid URL '{}': unsupported scheme '{}'",
            s, other
        ))),
    }
}

/// Parse a comma-delimited list of endpoint URLs.
///
/// Entries are trimmed and empty entries ignored. Invalid entries are dropped
/// with a warning; the call fails only if no valid URL remains.
pub fn parse_urls(input: &str) -> Result<Vec<String>> {
    parse_url_list(input.split(','))
}

/// Same as [`parse_urls`] for an already split list of candidates.
pub fn parse_url_list<I, S>(candidates: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut urls = Vec::new();

    for candidate in candidates {
        let candidate = candidate.as_ref().trim();
        if candidate.is_empty() {
            continue;
        }
        if is_valid_url(candidate) {
            urls.push(candidate.to_string());
        } else {
            tracing::warn!(url = %candidate, "Ignoring invalid RPC URL");
        }
    }

    if urls.is_empty() {
        return Err(ConfigError::configuration("no valid RPC URLs provided"));
    }

    Ok(urls)
}

/// Assert that a network configuration is complete.
pub fn validate_network_config(cfg: &NetworkConfig) -> Result<()> {
    if cfg.name.is_empty() {
        return Err(ConfigError::configuration("network name is required"));
    }
    if !is_valid_url(&cfg.primary_url) {
        return Err(ConfigError::configuration(format!(
            "network '{}' has an invalid primary URL '{}'",
            cfg.name, cfg.primary_url
        )));
    }
    if cfg.passphrase.is_empty() {
        return Err(ConfigError::configuration(format!(
            "network '{}' is missing a passphrase",
            cfg.name
        )));
    }
    Ok(())
}
