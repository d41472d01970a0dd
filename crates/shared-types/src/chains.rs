// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Network identifiers
//!
//! The marketplace runs on MultiversX mainnet and on the public devnet. Each
//! network has its own API host, gateway and contract address table, all of
//! which are selected once when a client is configured.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::contracts::ContractAddresses;

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chain {
    /// MultiversX mainnet - chain ID "1"
    #[default]
    Mainnet,
    /// MultiversX devnet - chain ID "D"
    Devnet,
}

impl Chain {
    /// Returns the lowercase network name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
        }
    }

    /// Returns the chain ID placed in transactions
    pub const fn chain_id(self) -> &'static str {
        match self {
            Self::Mainnet => "1",
            Self::Devnet => "D",
        }
    }

    /// Returns the default marketplace REST API base URL
    pub const fn default_api_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.xoxno.com",
            Self::Devnet => "https://devnet-api.xoxno.com",
        }
    }

    /// Returns the default gateway used for read-only contract queries
    pub const fn default_gateway_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://gateway.multiversx.com",
            Self::Devnet => "https://devnet-gateway.multiversx.com",
        }
    }

    /// Returns the default location of the contract interface descriptions
    pub const fn default_abi_base_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://media.xoxno.com/smartcontract/abi",
            Self::Devnet => "https://devnet-media.xoxno.com/smartcontract/abi",
        }
    }

    /// Returns the contract address table deployed on this network
    pub fn default_contract_addresses(self) -> ContractAddresses {
        match self {
            Self::Mainnet => ContractAddresses::mainnet(),
            Self::Devnet => ContractAddresses::devnet(),
        }
    }

    /// Returns all supported networks
    pub const fn all() -> &'static [Self] {
        &[Self::Mainnet, Self::Devnet]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Chain {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "1" => Ok(Self::Mainnet),
            "devnet" | "d" => Ok(Self::Devnet),
            _ => Err(ChainParseError(s.to_string())),
        }
    }
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a network name cannot be parsed
#[derive(Debug, thiserror::Error)]
#[error("unsupported network: {0}. Supported networks are: mainnet (1), devnet (D)")]
pub struct ChainParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids() {
        assert_eq!(Chain::Mainnet.chain_id(), "1");
        assert_eq!(Chain::Devnet.chain_id(), "D");
    }

    #[test]
    fn chain_from_str() {
        assert_eq!("mainnet".parse::<Chain>().unwrap(), Chain::Mainnet);
        assert_eq!("DEVNET".parse::<Chain>().unwrap(), Chain::Devnet);
        assert_eq!("1".parse::<Chain>().unwrap(), Chain::Mainnet);
        assert_eq!("D".parse::<Chain>().unwrap(), Chain::Devnet);
        assert!("testnet".parse::<Chain>().is_err());
    }

    #[test]
    fn chain_serde_round_trip() {
        let json = serde_json::to_string(&Chain::Devnet).unwrap();
        assert_eq!(json, "\"devnet\"");
        let chain: Chain = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(chain, Chain::Mainnet);
    }

    #[test]
    fn default_urls_differ_per_network() {
        assert_ne!(
            Chain::Mainnet.default_api_url(),
            Chain::Devnet.default_api_url()
        );
        assert!(Chain::Devnet.default_gateway_url().contains("devnet"));
    }
}
