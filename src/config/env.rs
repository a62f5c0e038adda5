//! Environment snapshot.
//!
//! The resolver never reads the process environment directly. Callers take a
//! snapshot (usually once, at startup) and pass it in, so resolution stays a
//! pure function of options and snapshot.

use std::collections::HashMap;
use std::ffi::OsString;

/// Comma-delimited list of RPC endpoint URLs.
pub const ENV_RPC_URLS: &str = "ERST_RPC_URLS";
/// Header source (JSON object or delimited pairs).
pub const ENV_RPC_HEADERS: &str = "ERST_RPC_HEADERS";
/// Bearer token sent with every request.
pub const ENV_RPC_TOKEN: &str = "ERST_RPC_TOKEN";
/// Request timeout override in milliseconds.
pub const ENV_RPC_TIMEOUT: &str = "ERST_RPC_TIMEOUT";
/// Retry count override.
pub const ENV_RPC_RETRIES: &str = "ERST_RPC_RETRIES";

/// An owned copy of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// An empty snapshot, as if no variables were set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build a snapshot from raw OS strings, skipping non-UTF-8 entries.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    let name = match &key {
                        Ok(k) => k.clone(),
                        Err(k) => k.to_string_lossy().into_owned(),
                    };
                    tracing::debug!(var = %name, "Skipping non-UTF-8 environment variable");
                    None
                }
            })
            .collect();
        Self { vars }
    }

    /// Look up a variable. Empty values are treated as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Look up and parse a variable, warning and returning `None` if it
    /// does not parse.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(var = key, value = %raw, "Ignoring unparseable environment override");
                None
            }
        }
    }

    /// Builder-style setter, mostly for tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
