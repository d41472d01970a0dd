// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Account and contract addresses
//!
//! Addresses are 32-byte public keys shown to users as bech32 strings with
//! the `erd` human-readable part.

use std::{fmt, str::FromStr};

use alloy_primitives::B256;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{InteractionError, InteractionResult};

const HRP: Hrp = Hrp::parse_unchecked("erd");

/// Number of leading zero bytes shared by every smart contract address
const CONTRACT_PREFIX_LEN: usize = 8;

/// 32-byte account or contract address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(B256);

impl Address {
    /// The all-zero address, used as receiver for system calls
    pub const ZERO: Self = Self(B256::ZERO);

    /// Wrap raw public key bytes
    pub const fn new(bytes: B256) -> Self {
        Self(bytes)
    }

    /// Decode an `erd1…` bech32 string
    pub fn from_bech32(value: &str) -> InteractionResult<Self> {
        let (hrp, data) = bech32::decode(value)
            .map_err(|e| InteractionError::address(format!("{value}: {e}")))?;
        if hrp != HRP {
            return Err(InteractionError::address(format!(
                "{value}: expected prefix {HRP}, got {hrp}"
            )));
        }
        Self::from_slice(&data)
    }

    /// Build from a 32-byte slice
    pub fn from_slice(bytes: &[u8]) -> InteractionResult<Self> {
        if bytes.len() != 32 {
            return Err(InteractionError::address(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self(B256::from_slice(bytes)))
    }

    /// Decode a 64-character hex public key (with or without `0x`)
    pub fn from_hex(value: &str) -> InteractionResult<Self> {
        let bytes = hex::decode(value.trim_start_matches("0x"))
            .map_err(|e| InteractionError::address(format!("{value}: {e}")))?;
        Self::from_slice(&bytes)
    }

    /// Bech32 representation
    pub fn to_bech32(&self) -> String {
        bech32::encode::<Bech32>(HRP, self.0.as_slice())
            .expect("32-byte payload with a static prefix is always encodable")
    }

    /// Lowercase hex of the public key, as used in call data
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw public key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0.0
    }

    /// Contract addresses start with eight zero bytes
    pub fn is_smart_contract(&self) -> bool {
        self.0[..CONTRACT_PREFIX_LEN].iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl FromStr for Address {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl From<B256> for Address {
    fn from(bytes: B256) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_bech32(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
    const ALICE_HEX: &str = "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1";

    #[test]
    fn decodes_known_account() {
        let alice = Address::from_bech32(ALICE).unwrap();
        assert_eq!(alice.to_hex(), ALICE_HEX);
        assert_eq!(alice.to_bech32(), ALICE);
        assert_eq!(Address::from_hex(ALICE_HEX).unwrap(), alice);
        assert!(!alice.is_smart_contract());
    }

    #[test]
    fn zero_address() {
        assert_eq!(
            Address::ZERO.to_string(),
            "erd1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq6gq4hu"
        );
    }

    #[test]
    fn contract_prefix() {
        let market: Address = "erd1qqqqqqqqqqqqqpgq4w46h2at4w46h2at4w46h2at4w46h2at4w4snxnswu"
            .parse()
            .unwrap();
        assert!(market.is_smart_contract());
        assert_eq!(&market.as_bytes()[8..10], &[0x05, 0x00]);
    }

    #[test]
    fn rejects_bad_input() {
        // Last character changed, checksum no longer matches
        let tampered = format!("{}x", &ALICE[..ALICE.len() - 1]);
        assert!(Address::from_bech32(&tampered).is_err());
        assert!(Address::from_bech32("erd1short").is_err());
        assert!(Address::from_hex("abcd").is_err());
        assert!(
            Address::from_bech32(
                "bc1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th"
            )
            .is_err()
        );
    }

    #[test]
    fn serde_as_bech32() {
        let alice = Address::from_bech32(ALICE).unwrap();
        let json = serde_json::to_string(&alice).unwrap();
        assert_eq!(json, format!("\"{ALICE}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alice);
    }
}
