// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collection profiles, statistics and collection-scoped listings

use api_client::{
    ApiClient, ApiError, ApiResult, FetchOptions, Page, Paginated, Paging, RawPage,
    encode_base64_json, encode_json,
};
use serde_json::Value;
use shared_types::CollectionTicker;
use tracing::{debug, instrument};

use crate::{
    filters::{Attribute, CollectionsArgs, GlobalOffersArgs, SearchNftsArgs, TradingActivityArgs},
    types::{
        CollectionAttributes, CollectionHolders, CollectionMintInfo, CollectionProfile,
        CollectionStats, GlobalOfferDoc, NftDoc, TradingActivity,
    },
    validate_address,
};

/// Default payment token for floor prices
pub const DEFAULT_FLOOR_TOKEN: &str = "EGLD";

/// Collection operations
#[derive(Debug, Clone)]
pub struct CollectionModule {
    client: ApiClient,
}

impl CollectionModule {
    /// Create the module over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Profile of a collection
    #[instrument(skip(self))]
    pub async fn get_collection_profile(&self, ticker: &str) -> ApiResult<CollectionProfile> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/profile"))
            .await
    }

    /// Floor price of a collection in `token`, `EGLD` when `None`
    #[instrument(skip(self))]
    pub async fn get_floor_price(&self, ticker: &str, token: Option<&str>) -> ApiResult<f64> {
        let ticker = CollectionTicker::new(ticker)?;
        let token = token.unwrap_or(DEFAULT_FLOOR_TOKEN);
        self.client
            .fetch_with_timeout(
                &format!("/collection/{ticker}/floor-price"),
                FetchOptions::get().param("token", token),
            )
            .await
    }

    /// Attribute occurrence statistics of a collection
    #[instrument(skip(self))]
    pub async fn get_collection_attributes(
        &self,
        ticker: &str,
    ) -> ApiResult<CollectionAttributes> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/attributes"))
            .await
    }

    /// Trading statistics of a collection
    #[instrument(skip(self))]
    pub async fn get_collection_stats(&self, ticker: &str) -> ApiResult<CollectionStats> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/stats"))
            .await
    }

    /// Holder breakdown of a collection
    #[instrument(skip(self))]
    pub async fn get_collection_holders(&self, ticker: &str) -> ApiResult<CollectionHolders> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/holders"))
            .await
    }

    /// Launchpad drop information of a collection
    #[instrument(skip(self))]
    pub async fn get_collection_mint_info(
        &self,
        ticker: &str,
    ) -> ApiResult<CollectionMintInfo> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/drop-info"))
            .await
    }

    /// List collections; the filter travels as a JSON query parameter
    #[instrument(skip(self, args), fields(top = args.paging.top, skip = args.paging.skip))]
    pub async fn get_collections(
        &self,
        args: &CollectionsArgs,
    ) -> ApiResult<Page<CollectionProfile, CollectionsArgs>> {
        args.validate_paging()?;
        for ticker in &args.collections {
            CollectionTicker::new(ticker.as_str())?;
        }

        let filter = encode_json(&args.filter())?;
        let raw: RawPage<CollectionProfile> = self
            .client
            .fetch_with_timeout("/collection/query", FetchOptions::get().param("filter", filter))
            .await?;

        Ok(Page::from_raw(raw, args))
    }

    /// Search NFTs; the filter travels base64-encoded in the path
    #[instrument(skip(self, args), fields(top = args.paging.top, skip = args.paging.skip))]
    pub async fn search_nfts(
        &self,
        args: &SearchNftsArgs,
    ) -> ApiResult<Page<NftDoc, SearchNftsArgs>> {
        args.validate_paging()?;
        for ticker in &args.collections {
            CollectionTicker::new(ticker.as_str())?;
        }
        for owner in &args.owners {
            validate_address(owner)?;
        }

        let payload = encode_base64_json(&args.filter())?;
        debug!(payload, "searching NFTs");
        let raw: RawPage<NftDoc> = self
            .client
            .get(&format!("/nft/{payload}/query"))
            .await?;

        Ok(Page::from_raw(raw, args))
    }

    /// Trading activity; the filter travels as a JSON query parameter
    #[instrument(skip(self, args), fields(top = args.paging.top, skip = args.paging.skip))]
    pub async fn get_trading_activity(
        &self,
        args: &TradingActivityArgs,
    ) -> ApiResult<Page<TradingActivity, TradingActivityArgs>> {
        args.validate_paging()?;

        let filter = encode_json(&args.filter())?;
        let raw: RawPage<TradingActivity> = self
            .client
            .fetch_with_timeout("/activity/query", FetchOptions::get().param("filter", filter))
            .await?;

        Ok(Page::from_raw(raw, args))
    }

    /// Collection-wide offers; the filter travels base64-encoded in the path
    #[instrument(skip(self, args), fields(top = args.paging.top, skip = args.paging.skip))]
    pub async fn get_global_offers(
        &self,
        args: &GlobalOffersArgs,
    ) -> ApiResult<Page<GlobalOfferDoc, GlobalOffersArgs>> {
        args.validate_paging()?;
        for ticker in &args.collections {
            CollectionTicker::new(ticker.as_str())?;
        }

        let payload = encode_base64_json(&args.filter())?;
        let raw: RawPage<GlobalOfferDoc> = self
            .client
            .get(&format!("/global-offer/{payload}/query"))
            .await?;

        Ok(Page::from_raw(raw, args))
    }

    /// NFTs owned by `address` in `ticker` that could fill global offer `offer_id`
    ///
    /// Looks the offer up first and searches with its attribute constraints,
    /// so this issues two requests. An unknown offer id is a validation error.
    #[instrument(skip(self))]
    pub async fn suggest_nfts_for_global_offer(
        &self,
        offer_id: u64,
        address: &str,
        ticker: &str,
    ) -> ApiResult<Page<NftDoc, SearchNftsArgs>> {
        validate_address(address)?;
        let ticker = CollectionTicker::new(ticker)?;

        let offers = self
            .get_global_offers(&GlobalOffersArgs {
                collections: vec![ticker.to_string()],
                offer_ids: vec![offer_id],
                paging: Paging::new(1, 0),
                ..GlobalOffersArgs::default()
            })
            .await?;
        let offer = offers
            .resources
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::validation(format!("Global offer {offer_id} not found")))?;

        let attributes = offer
            .attributes
            .iter()
            .map(|a| match &a.value {
                Value::String(value) => Attribute::new(a.trait_type.as_str(), value.as_str()),
                other => Attribute::new(a.trait_type.as_str(), other.to_string()),
            })
            .collect();

        let args = SearchNftsArgs {
            collections: vec![ticker.to_string()],
            owners: vec![address.to_string()],
            attributes,
            paging: Paging::new(SearchNftsArgs::MAX_TOP, 0),
            ..SearchNftsArgs::default()
        };

        self.search_nfts(&args).await
    }
}
