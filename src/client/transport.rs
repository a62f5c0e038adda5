//! HTTP transport handle construction.
//!
//! The crate never speaks the RPC protocol itself; it only prepares a
//! `reqwest::Client` carrying the credentials, headers and limits the
//! dispatcher should use for every request.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::redirect;

use crate::error::{ConfigError, Result};

/// Build the default transport handle.
///
/// A zero `timeout` leaves requests without a deadline.
pub fn build_http_client(
    token: Option<&str>,
    headers: &HashMap<String, String>,
    timeout: Duration,
    max_redirects: u32,
) -> Result<reqwest::Client> {
    let default_headers = header_map(token, headers)?;

    let mut builder = reqwest::Client::builder()
        .default_headers(default_headers)
        .redirect(redirect::Policy::limited(max_redirects as usize));

    if !timeout.is_zero() {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

fn header_map(token: Option<&str>, headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 1);

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::validation(format!("invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ConfigError::validation(format!("invalid value for header '{}': {}", name, e)))?;
        map.insert(header_name, header_value);
    }

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ConfigError::validation("RPC token contains invalid header characters"))?;
        value.set_sensitive(true);
        map.insert(AUTHORIZATION, value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_with_token() {
        let headers = HashMap::from([("X-Api-Key".to_string(), "abc".to_string())]);
        let map = header_map(Some("secret"), &headers).unwrap();

        assert_eq!(map.get("x-api-key").unwrap(), "abc");
        let auth = map.get(AUTHORIZATION).unwrap();
        assert_eq!(auth, "Bearer secret");
        assert!(auth.is_sensitive());
    }

    #[test]
    fn test_empty_token_adds_nothing() {
        let map = header_map(Some(""), &HashMap::new()).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_invalid_header_is_validation_error() {
        let headers = HashMap::from([("bad header".to_string(), "v".to_string())]);
        assert!(header_map(None, &headers).unwrap_err().is_validation());

        let headers = HashMap::from([("X-Ok".to_string(), "line\nbreak".to_string())]);
        assert!(header_map(None, &headers).unwrap_err().is_validation());
    }

    #[test]
    fn test_build_without_timeout() {
        let client = build_http_client(None, &HashMap::new(), Duration::ZERO, 5);
        assert!(client.is_ok());
    }
}
