// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the marketplace SDK
//!
//! This crate provides the network, contract and identifier types used by
//! the REST façades, the contract interaction builders and their tests,
//! avoiding circular dependencies between them.

pub mod chains;
pub mod contracts;
pub mod identifiers;

pub use chains::{Chain, ChainParseError};
pub use contracts::{ContractAddresses, ContractCategory};
pub use identifiers::{
    CollectionTicker, IdentifierError, NftIdentifier, get_identifier_from_col_and_nonce,
    is_valid_address, is_valid_collection_ticker, is_valid_nft_identifier, nonce_to_hex,
    split_identifier,
};
