// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Domain façades over the marketplace REST API
//!
//! Each module validates its inputs, shapes the request and issues exactly
//! one call through a shared [`ApiClient`].
//!
//! # Modules
//!
//! - [`CollectionModule`]: profiles, statistics, listings, NFT search, activity, global offers
//! - [`NftModule`]: single NFTs, offers, activity and trending
//! - [`UserModule`]: profiles, inventories, NFTs, offers and staking summary
//! - [`StakingModule`]: staking pools and user positions
//! - [`CommonModule`]: token prices, payment tokens, search and analytics
//!
//! Listing operations take an argument struct from [`filters`] and return a
//! [`api_client::Page`] whose `next_page` fetches the following page.
//!
//! ```no_run
//! # async fn run() -> api_client::ApiResult<()> {
//! use api_client::{ClientConfig, Paging};
//! use marketplace::{Marketplace, filters::SearchNftsArgs};
//! use shared_types::Chain;
//!
//! let market = Marketplace::from_config(ClientConfig::new(Chain::Mainnet))?;
//! let args = SearchNftsArgs {
//!     collections: vec!["BANANA-e955fd".to_string()],
//!     paging: Paging::new(10, 0),
//!     ..SearchNftsArgs::default()
//! };
//! let page = market.collection().search_nfts(&args).await?;
//! let next = market.collection().search_nfts(&page.next_page).await?;
//! # let _ = next;
//! # Ok(())
//! # }
//! ```

use api_client::{ApiClient, ApiResult, ClientConfig};
use shared_types::{IdentifierError, is_valid_address};

pub mod collection;
pub mod common;
pub mod filters;
pub mod nft;
pub mod staking;
pub mod types;
pub mod user;

pub use collection::CollectionModule;
pub use common::CommonModule;
pub use nft::NftModule;
pub use staking::StakingModule;
pub use user::UserModule;

/// All façades over one client
#[derive(Debug, Clone)]
pub struct Marketplace {
    client: ApiClient,
}

impl Marketplace {
    /// Wrap an existing client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Build a client from `config` and wrap it
    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::new(ApiClient::new(config)?))
    }

    /// Underlying client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Collection operations
    pub fn collection(&self) -> CollectionModule {
        CollectionModule::new(self.client.clone())
    }

    /// NFT operations
    pub fn nft(&self) -> NftModule {
        NftModule::new(self.client.clone())
    }

    /// User operations
    pub fn user(&self) -> UserModule {
        UserModule::new(self.client.clone())
    }

    /// Staking operations
    pub fn staking(&self) -> StakingModule {
        StakingModule::new(self.client.clone())
    }

    /// Token, search and analytics operations
    pub fn common(&self) -> CommonModule {
        CommonModule::new(self.client.clone())
    }
}

pub(crate) fn validate_address(address: &str) -> ApiResult<()> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(IdentifierError::InvalidAddress(address.to_string()).into())
    }
}
