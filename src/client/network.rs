//! Network identifiers and canonical endpoint configurations.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAINNET_HORIZON_URL: &str = "https://horizon.stellar.org";
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";
pub const FUTURENET_HORIZON_URL: &str = "https://horizon-futurenet.stellar.org";

pub const MAINNET_SOROBAN_URL: &str = "https://mainnet.sorobanrpc.com";
pub const TESTNET_SOROBAN_URL: &str = "https://soroban-testnet.stellar.org";
pub const FUTURENET_SOROBAN_URL: &str = "https://rpc-futurenet.stellar.org";

pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

/// Network identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Futurenet,
    /// A user-defined network; canonical defaults fall back to mainnet.
    Custom(String),
}

impl Network {
    /// Parse a network name. Empty input is mainnet; unknown names are custom.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "" | "mainnet" | "public" => Network::Mainnet,
            "testnet" => Network::Testnet,
            "futurenet" => Network::Futurenet,
            _ => Network::Custom(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Futurenet => "futurenet",
            Network::Custom(name) => name,
        }
    }

    /// Canonical primary (Horizon) endpoint.
    pub fn default_primary_url(&self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_HORIZON_URL,
            Network::Futurenet => FUTURENET_HORIZON_URL,
            _ => MAINNET_HORIZON_URL,
        }
    }

    /// Canonical secondary (contract RPC) endpoint.
    pub fn default_secondary_url(&self) -> &'static str {
        match self {
            Network::Testnet => TESTNET_SOROBAN_URL,
            Network::Futurenet => FUTURENET_SOROBAN_URL,
            _ => MAINNET_SOROBAN_URL,
        }
    }

    /// Canonical configuration for this network.
    pub fn config(&self) -> NetworkConfig {
        match self {
            Network::Testnet => NetworkConfig::testnet(),
            Network::Futurenet => NetworkConfig::futurenet(),
            _ => NetworkConfig::mainnet(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Network {
    fn from(name: &str) -> Self {
        Network::parse(name)
    }
}

/// Endpoint set and passphrase for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    /// Horizon endpoint.
    pub primary_url: String,
    /// Soroban RPC endpoint.
    #[serde(default)]
    pub secondary_url: String,
    pub passphrase: String,
}

impl NetworkConfig {
    pub fn mainnet() -> Self {
        Self::canonical("mainnet", MAINNET_HORIZON_URL, MAINNET_SOROBAN_URL, MAINNET_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::canonical("testnet", TESTNET_HORIZON_URL, TESTNET_SOROBAN_URL, TESTNET_PASSPHRASE)
    }

    pub fn futurenet() -> Self {
        Self::canonical(
            "futurenet",
            FUTURENET_HORIZON_URL,
            FUTURENET_SOROBAN_URL,
            FUTURENET_PASSPHRASE,
        )
    }

    fn canonical(name: &str, primary: &str, secondary: &str, passphrase: &str) -> Self {
        Self {
            name: name.to_string(),
            primary_url: primary.to_string(),
            secondary_url: secondary.to_string(),
            passphrase: passphrase.to_string(),
        }
    }
}
