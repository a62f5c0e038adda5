//! Error definitions for configuration and client construction.

use thiserror::Error;

/// Errors that can occur while resolving configuration or building a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable endpoint, or an incomplete network configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An explicitly supplied value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Options file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file is not valid TOML for the options schema.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The HTTP transport handle could not be constructed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ConfigError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Prefix the message of a configuration or validation error.
    pub fn context(self, prefix: &str) -> Self {
        match self {
            Self::Configuration(msg) => Self::Configuration(format!("{}: {}", prefix, msg)),
            Self::Validation(msg) => Self::Validation(format!("{}: {}", prefix, msg)),
            other => other,
        }
    }

    /// Returns true for [`ConfigError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns true for [`ConfigError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for configuration and construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
