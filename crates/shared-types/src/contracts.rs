// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Smart contract categories and per-network address tables

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of marketplace smart contract
///
/// Each category has its own interface description (ABI). Launchpad minters
/// are deployed once per collection, so [`ContractCategory::Minter`] has no
/// entry in [`ContractAddresses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractCategory {
    /// Auctions, listings, custom and global offers, deposits
    Market,
    /// Launchpad minter contracts
    Minter,
    /// NFT staking pools
    Staking,
    /// Token swaps
    Exchange,
    /// Peer-to-peer trades
    P2p,
    /// Collection manager
    Manager,
}

impl ContractCategory {
    /// File name of the interface description for this category
    pub const fn abi_file_name(self) -> &'static str {
        match self {
            Self::Market => "xoxno-market.abi.json",
            Self::Minter => "minter.abi.json",
            Self::Staking => "staking.abi.json",
            Self::Exchange => "exchange.abi.json",
            Self::P2p => "p2p.abi.json",
            Self::Manager => "manager.abi.json",
        }
    }

    /// Lowercase category name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Minter => "minter",
            Self::Staking => "staking",
            Self::Exchange => "exchange",
            Self::P2p => "p2p",
            Self::Manager => "manager",
        }
    }

    /// All contract categories
    pub const fn all() -> &'static [Self] {
        &[
            Self::Market,
            Self::Minter,
            Self::Staking,
            Self::Exchange,
            Self::P2p,
            Self::Manager,
        ]
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bech32 addresses of the fixed marketplace contracts on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// Marketplace contract
    pub market: String,
    /// Collection manager contract
    pub manager: String,
    /// Staking contract
    pub staking: String,
    /// Peer-to-peer trading contract
    pub p2p: String,
    /// Token exchange contract
    pub exchange: String,
}

impl ContractAddresses {
    /// Mainnet deployment
    pub fn mainnet() -> Self {
        Self {
            market: "erd1qqqqqqqqqqqqqpgq6wegs2xkypfpync8mn2sa5cmpqjlvrhwz5nqgepyg8".to_string(),
            manager: "erd1qqqqqqqqqqqqqpgqg9fa0dmpn8fu3fnleeqn5zt8rl8mdqjkys5s2gtas7".to_string(),
            staking: "erd1qqqqqqqqqqqqqpgqvpkd3g3uwludduv3797j54qt6c888wa59w2shntt6z".to_string(),
            p2p: "erd1qqqqqqqqqqqqqpgqq6sygcte0k6j2w0g6l4z6f3vm2f04uhkhm7scs82s3".to_string(),
            exchange: "erd1qqqqqqqqqqqqqpgqcmnum66jxyfpcnvqk5eahj5n3ny4vkfn0n4szjjskv".to_string(),
        }
    }

    /// Devnet deployment
    pub fn devnet() -> Self {
        Self {
            market: "erd1qqqqqqqqqqqqqpgqz5hmqkc0kqqr54a5kdqfzdpyd6svqezjys5sq4t2l4".to_string(),
            manager: "erd1qqqqqqqqqqqqqpgqvl2ud8mqhqnkv4n5jzyqthnax6j9u2plys5syact82".to_string(),
            staking: "erd1qqqqqqqqqqqqqpgqrk4y2jf3hfaq6lgqshkmp27dhgxjg0mvys5svhwkjn".to_string(),
            p2p: "erd1qqqqqqqqqqqqqpgqf2ve6ecaxlcz8m98xl2jwde3jfvefcsmys5s5w6v32".to_string(),
            exchange: "erd1qqqqqqqqqqqqqpgqzcl9x7xa7z8ypwz9j5nzvn6kz9gkjv8jys5svgxj4e".to_string(),
        }
    }

    /// Address of the contract for `category`, if it has a fixed deployment
    pub fn address_for(&self, category: ContractCategory) -> Option<&str> {
        match category {
            ContractCategory::Market => Some(&self.market),
            ContractCategory::Manager => Some(&self.manager),
            ContractCategory::Staking => Some(&self.staking),
            ContractCategory::P2p => Some(&self.p2p),
            ContractCategory::Exchange => Some(&self.exchange),
            ContractCategory::Minter => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minter_has_no_fixed_address() {
        let addresses = ContractAddresses::mainnet();
        assert!(addresses.address_for(ContractCategory::Minter).is_none());
        assert_eq!(
            addresses.address_for(ContractCategory::Market),
            Some(addresses.market.as_str())
        );
    }

    #[test]
    fn every_category_has_an_abi_file() {
        for category in ContractCategory::all() {
            assert!(category.abi_file_name().ends_with(".abi.json"));
        }
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&ContractCategory::P2p).unwrap();
        assert_eq!(json, "\"p2p\"");
    }
}
