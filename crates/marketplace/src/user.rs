// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! User profiles, inventories, NFTs and offers

use api_client::{ApiClient, ApiResult, Page, Paging};
use tracing::instrument;

use crate::{
    CollectionModule, NftModule,
    filters::{NftOffersArgs, OfferDirection, SearchNftsArgs},
    types::{
        InventoryCollection, NftDoc, NftOffer, TokenBalance, UserProfile, UserStakingSummary,
    },
    validate_address,
};

/// User operations
///
/// Every operation checks the address prefix and length before any request.
#[derive(Debug, Clone)]
pub struct UserModule {
    client: ApiClient,
}

impl UserModule {
    /// Create the module over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of a user
    #[instrument(skip(self))]
    pub async fn get_user_profile(&self, address: &str) -> ApiResult<UserProfile> {
        validate_address(address)?;
        self.client.get(&format!("/user/{address}/profile")).await
    }

    /// Per-collection inventory summary
    #[instrument(skip(self))]
    pub async fn get_user_inventory(&self, address: &str) -> ApiResult<Vec<InventoryCollection>> {
        validate_address(address)?;
        self.client
            .get(&format!("/user/{address}/inventory-summary"))
            .await
    }

    /// Fungible token balances
    #[instrument(skip(self))]
    pub async fn get_user_token_inventory(&self, address: &str) -> ApiResult<Vec<TokenBalance>> {
        validate_address(address)?;
        self.client
            .get(&format!("/user/{address}/token-inventory"))
            .await
    }

    /// NFTs held by `address`, narrowed by `args`
    ///
    /// Any owners in `args` are replaced by `address`; the returned
    /// `next_page` carries that owner filter.
    pub async fn get_user_nfts(
        &self,
        address: &str,
        args: &SearchNftsArgs,
    ) -> ApiResult<Page<NftDoc, SearchNftsArgs>> {
        validate_address(address)?;
        let args = SearchNftsArgs {
            owners: vec![address.to_string()],
            ..args.clone()
        };

        CollectionModule::new(self.client.clone())
            .search_nfts(&args)
            .await
    }

    /// Offers placed by `address` or received on NFTs it holds
    pub async fn get_user_offers(
        &self,
        address: &str,
        direction: OfferDirection,
        paging: Paging,
    ) -> ApiResult<Page<NftOffer, NftOffersArgs>> {
        validate_address(address)?;
        let owner = vec![address.to_string()];
        let args = match direction {
            OfferDirection::Placed => NftOffersArgs {
                offer_makers: owner,
                paging,
                ..NftOffersArgs::default()
            },
            OfferDirection::Received => NftOffersArgs {
                nft_owners: owner,
                paging,
                ..NftOffersArgs::default()
            },
        };

        NftModule::new(self.client.clone())
            .get_nft_offers(&args)
            .await
    }

    /// Staking summary across pools
    #[instrument(skip(self))]
    pub async fn get_user_staking_summary(&self, address: &str) -> ApiResult<UserStakingSummary> {
        validate_address(address)?;
        self.client
            .get(&format!("/user/{address}/staking/summary"))
            .await
    }
}
