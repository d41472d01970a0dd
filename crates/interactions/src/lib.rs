// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Smart contract interactions for the marketplace contracts
//!
//! Transactions are built from contract ABIs and returned unsigned: signing
//! and broadcasting belong to the caller's wallet.
//!
//! # Core Abstractions
//!
//! - **[`Abi`]**: endpoint and type descriptions, fetched by [`AbiLoader`] and
//!   shared through [`AbiCache`]
//! - **[`TypedValue`]** / **[`TypeExpr`]**: argument values and the type
//!   grammar used by the [`codec`]
//! - **[`SmartContract`]**: ABI-checked calls and view queries
//! - **[`CallBuilder`]**: call data and payment encoding into a [`TransactionDraft`]
//! - **[`QueryProvider`]**: read-only query transport, [`GatewayProvider`] by default
//!
//! # Interactions
//!
//! - [`MarketInteraction`]: listings, purchases, bids, offers and deposits
//! - [`StakingInteraction`]: staking pools and rewards
//! - [`LaunchpadInteraction`]: launchpad mints

pub mod abi;
pub mod address;
pub mod cache;
pub mod codec;
pub mod contract;
pub mod error;
pub mod launchpad;
pub mod market;
pub mod provider;
pub mod records;
pub mod staking;
pub mod transaction;
pub mod types;

pub use abi::{Abi, AbiEndpoint, AbiLoader, AbiTypeDef, Mutability};
pub use address::Address;
pub use cache::{AbiCache, CacheStats};
pub use contract::SmartContract;
pub use error::{InteractionError, InteractionResult};
pub use launchpad::LaunchpadInteraction;
pub use market::{
    ListingChange, MarketInteraction, MarketplaceId, NewCustomOffer, NewGlobalOffer, NewListing,
};
pub use provider::{ContractQuery, GatewayProvider, QueryProvider};
pub use records::{AuctionInfo, AuctionType, CustomOffer, GlobalOffer, TokenDecimals, TokenPayment};
pub use staking::StakingInteraction;
pub use transaction::{
    CallBuilder, EGLD, Operation, Payment, TokenTransfer, TransactionDraft, TxContext,
};
pub use types::{TypeExpr, TypedValue};
