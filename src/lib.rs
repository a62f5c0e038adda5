//! Endpoint configuration and circuit-breaker state for redundant RPC endpoints.

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod observability;
pub mod resilience;

pub use client::{ClientOption, Network, NetworkConfig, RpcClient};
pub use config::{load_config, ClientConfiguration, EnvSnapshot, RpcOptions, RpcPolicy};
pub use error::{ConfigError, Result};
pub use health::{CircuitState, FailureTracker, Selection};
