// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Single NFT lookups, offers, activity and trending

use api_client::{
    ApiClient, ApiResult, FetchOptions, Page, Paginated, Paging, RawPage, encode_json,
};
use shared_types::{CollectionTicker, NftIdentifier};
use tracing::instrument;

use crate::{
    CollectionModule,
    filters::{DailyTrendingArgs, NftOffersArgs, TradingActivityArgs},
    types::{NftDoc, NftOffer, TradingActivity},
};

/// NFT operations
#[derive(Debug, Clone)]
pub struct NftModule {
    client: ApiClient,
}

impl NftModule {
    /// Create the module over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// NFT by full identifier (`TICKER-hash6-nonce`)
    #[instrument(skip(self))]
    pub async fn get_nft_by_identifier(&self, identifier: &str) -> ApiResult<NftDoc> {
        let identifier = NftIdentifier::new(identifier)?;
        self.client.get(&format!("/nft/{identifier}")).await
    }

    /// NFT by collection ticker and nonce
    pub async fn get_nft_by_collection_and_nonce(
        &self,
        ticker: &str,
        nonce: u64,
    ) -> ApiResult<NftDoc> {
        let identifier = CollectionTicker::new(ticker)?.nft(nonce);
        self.get_nft_by_identifier(identifier.as_str()).await
    }

    /// Offers on NFTs; the filter travels as a JSON query parameter
    #[instrument(skip(self, args), fields(top = args.paging.top, skip = args.paging.skip))]
    pub async fn get_nft_offers(
        &self,
        args: &NftOffersArgs,
    ) -> ApiResult<Page<NftOffer, NftOffersArgs>> {
        args.validate_paging()?;
        for identifier in &args.identifiers {
            NftIdentifier::new(identifier.as_str())?;
        }

        let filter = encode_json(&args.filter())?;
        let raw: RawPage<NftOffer> = self
            .client
            .fetch_with_timeout(
                "/nft/offer/query",
                FetchOptions::get().param("filter", filter),
            )
            .await?;

        Ok(Page::from_raw(raw, args))
    }

    /// Trading activity of one NFT
    pub async fn get_nft_activity(
        &self,
        identifier: &str,
        paging: Paging,
    ) -> ApiResult<Page<TradingActivity, TradingActivityArgs>> {
        let identifier = NftIdentifier::new(identifier)?;
        let args = TradingActivityArgs {
            collections: vec![identifier.collection().to_string()],
            identifiers: vec![identifier.to_string()],
            paging,
            ..TradingActivityArgs::default()
        };

        CollectionModule::new(self.client.clone())
            .get_trading_activity(&args)
            .await
    }

    /// NFTs trending over the last day
    #[instrument(skip(self))]
    pub async fn get_daily_trending(
        &self,
        paging: Paging,
    ) -> ApiResult<Page<NftDoc, DailyTrendingArgs>> {
        let args = DailyTrendingArgs { paging };
        args.validate_paging()?;

        let items: Vec<NftDoc> = self
            .client
            .fetch_with_timeout(
                "/nft/trending",
                FetchOptions::get()
                    .param("top", paging.top)
                    .param("skip", paging.skip),
            )
            .await?;

        Ok(Page::from_items(items, &args))
    }
}
