// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collection tickers, NFT identifiers and account addresses
//!
//! A collection ticker is an uppercase name followed by a six character
//! hash (`BANANA-e955fd`). An NFT identifier appends the nonce as an
//! even-length lowercase hex string (`BANANA-e955fd-01`).

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

static TICKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{3,10}-[a-zA-Z0-9]{6}$").expect("ticker regex is valid")
});

static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{3,10}-[a-zA-Z0-9]{6}-(?:[a-f0-9]{2})+$")
        .expect("identifier regex is valid")
});

/// Human-readable prefix of account and contract addresses
pub const ADDRESS_PREFIX: &str = "erd1";

/// Length of a bech32 encoded address
pub const ADDRESS_LENGTH: usize = 62;

/// Errors raised when validating identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum IdentifierError {
    /// Collection ticker does not match `TICKER-hash6`
    #[error("invalid collection ticker: {0}")]
    InvalidTicker(String),

    /// NFT identifier does not match `TICKER-hash6-nonce`
    #[error("invalid NFT identifier: {0}")]
    InvalidIdentifier(String),

    /// Address does not carry the expected prefix or length
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Check that `ticker` is a well formed collection ticker
pub fn is_valid_collection_ticker(ticker: &str) -> bool {
    TICKER_REGEX.is_match(ticker)
}

/// Check that `identifier` is a well formed NFT identifier
pub fn is_valid_nft_identifier(identifier: &str) -> bool {
    IDENTIFIER_REGEX.is_match(identifier)
}

/// Check that `address` looks like a bech32 account address
///
/// Only the prefix and length are checked; the checksum is verified when an
/// address is decoded for a transaction.
pub fn is_valid_address(address: &str) -> bool {
    address.starts_with(ADDRESS_PREFIX) && address.len() == ADDRESS_LENGTH
}

/// Encode a nonce as lowercase hex padded to an even number of digits
pub fn nonce_to_hex(nonce: u64) -> String {
    let hex = format!("{nonce:x}");
    if hex.len() % 2 == 0 {
        hex
    } else {
        format!("0{hex}")
    }
}

/// Build the NFT identifier for `nonce` within `collection`
pub fn get_identifier_from_col_and_nonce(collection: &str, nonce: u64) -> String {
    format!("{collection}-{}", nonce_to_hex(nonce))
}

/// Split an NFT identifier into its collection ticker and nonce
pub fn split_identifier(identifier: &str) -> Result<(String, u64), IdentifierError> {
    if !is_valid_nft_identifier(identifier) {
        return Err(IdentifierError::InvalidIdentifier(identifier.to_string()));
    }

    let (collection, nonce_hex) = identifier
        .rsplit_once('-')
        .ok_or_else(|| IdentifierError::InvalidIdentifier(identifier.to_string()))?;
    let nonce = u64::from_str_radix(nonce_hex, 16)
        .map_err(|_| IdentifierError::InvalidIdentifier(identifier.to_string()))?;

    Ok((collection.to_string(), nonce))
}

/// A validated collection ticker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionTicker(String);

impl CollectionTicker {
    /// Validate and wrap a ticker
    pub fn new(ticker: impl Into<String>) -> Result<Self, IdentifierError> {
        let ticker = ticker.into();
        if is_valid_collection_ticker(&ticker) {
            Ok(Self(ticker))
        } else {
            Err(IdentifierError::InvalidTicker(ticker))
        }
    }

    /// Ticker as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the NFT with `nonce` in this collection
    pub fn nft(&self, nonce: u64) -> NftIdentifier {
        NftIdentifier(get_identifier_from_col_and_nonce(&self.0, nonce))
    }
}

/// A validated NFT identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NftIdentifier(String);

impl NftIdentifier {
    /// Validate and wrap an identifier
    pub fn new(identifier: impl Into<String>) -> Result<Self, IdentifierError> {
        let identifier = identifier.into();
        if is_valid_nft_identifier(&identifier) {
            Ok(Self(identifier))
        } else {
            Err(IdentifierError::InvalidIdentifier(identifier))
        }
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Collection ticker part
    pub fn collection(&self) -> CollectionTicker {
        let collection = self.0.rsplit_once('-').map_or(self.0.as_str(), |(c, _)| c);
        CollectionTicker(collection.to_string())
    }

    /// Nonce part
    pub fn nonce(&self) -> u64 {
        self.0
            .rsplit_once('-')
            .and_then(|(_, hex)| u64::from_str_radix(hex, 16).ok())
            .unwrap_or_default()
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $ty {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::new(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_newtype_impls!(CollectionTicker);
string_newtype_impls!(NftIdentifier);
