// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Listing arguments and the filter documents sent to the backend
//!
//! Each `*Args` struct is what callers build and what comes back as
//! [`api_client::Page::next_page`]. The matching filter document is the
//! exact JSON shape the endpoint expects: unset lists are sent as `[]`, unset
//! flags as `false`, and unset ranges or sort orders are omitted.

use api_client::{MAX_TOP_EXTENDED, MAX_TOP_STANDARD, Paginated, Paging};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

macro_rules! paginated_args {
    ($ty:ty, $max:expr) => {
        impl Paginated for $ty {
            const MAX_TOP: u32 = $max;

            fn paging(&self) -> Paging {
                self.paging
            }

            fn set_paging(&mut self, paging: Paging) {
                self.paging = paging;
            }
        }
    };
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Range {
    /// Create a range
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Inclusive range of unix timestamps in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start timestamp
    pub from: i64,
    /// End timestamp
    pub to: i64,
}

/// NFT attribute filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Trait name
    pub trait_type: String,
    /// Trait value
    pub value: String,
}

impl Attribute {
    /// Create an attribute filter
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RangeFilter {
    field: &'static str,
    min: f64,
    max: f64,
}

fn range_filter(field: &'static str, range: Option<Range>) -> Option<RangeFilter> {
    range.map(|r| RangeFilter {
        field,
        min: r.min,
        max: r.max,
    })
}

/// Sort orders of the collection listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CollectionsOrderBy {
    #[serde(rename = "statistics.tradeData.totalVolume desc")]
    TotalVolumeDesc,
    #[serde(rename = "statistics.tradeData.dayVolume desc")]
    DayVolumeDesc,
    #[serde(rename = "statistics.tradeData.weekVolume desc")]
    WeekVolumeDesc,
    #[serde(rename = "statistics.other.followCount desc")]
    FollowersDesc,
    #[serde(rename = "floorPrice asc")]
    FloorPriceAsc,
    #[serde(rename = "floorPrice desc")]
    FloorPriceDesc,
}

/// Sort orders of NFT search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum NftOrderBy {
    #[serde(rename = "saleInfo.minBidShort asc")]
    PriceLowToHigh,
    #[serde(rename = "saleInfo.minBidShort desc")]
    PriceHighToLow,
    #[serde(rename = "saleInfo.timestamp desc")]
    RecentlyListed,
    #[serde(rename = "metadata.rarity.rank asc")]
    RankLowToHigh,
    #[serde(rename = "metadata.rarity.rank desc")]
    RankHighToLow,
    #[serde(rename = "nonce asc")]
    NonceAsc,
    #[serde(rename = "nonce desc")]
    NonceDesc,
}

/// Sort orders of trading activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ActivityOrderBy {
    #[serde(rename = "timestamp desc")]
    Newest,
    #[serde(rename = "timestamp asc")]
    Oldest,
    #[serde(rename = "activityData.egldValue desc")]
    PriceHighToLow,
    #[serde(rename = "activityData.egldValue asc")]
    PriceLowToHigh,
}

/// Sort orders of custom and global offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum OfferOrderBy {
    #[serde(rename = "priceShort desc")]
    PriceHighToLow,
    #[serde(rename = "priceShort asc")]
    PriceLowToHigh,
    #[serde(rename = "timestamp desc")]
    Newest,
    #[serde(rename = "timestamp asc")]
    Oldest,
}

/// Kind of trading activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ActivityType {
    Listing,
    Trade,
    Bid,
    Offer,
    GlobalOffer,
    Withdraw,
    ChangePrice,
    Mint,
    Stake,
    Unstake,
}

/// Which side of an offer a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferDirection {
    /// Offers the user made
    #[default]
    Placed,
    /// Offers on NFTs the user owns
    Received,
}

/// Arguments of [`crate::CollectionModule::get_collections`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsArgs {
    /// Restrict to these tickers
    pub collections: Vec<String>,
    /// Only verified collections
    pub only_verified: bool,
    /// Only collections with an active mint
    pub only_mintable: bool,
    /// Sort order
    pub order_by: Option<CollectionsOrderBy>,
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(CollectionsArgs, MAX_TOP_STANDARD);

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CollectionsFilter<'a> {
    filters: CollectionsFilterFields<'a>,
    order_by: Option<[CollectionsOrderBy; 1]>,
    top: u32,
    skip: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionsFilterFields<'a> {
    collection: &'a [String],
    is_verified: bool,
    is_mintable: bool,
}

impl CollectionsArgs {
    pub(crate) fn filter(&self) -> CollectionsFilter<'_> {
        CollectionsFilter {
            filters: CollectionsFilterFields {
                collection: &self.collections,
                is_verified: self.only_verified,
                is_mintable: self.only_mintable,
            },
            order_by: self.order_by.map(|o| [o]),
            top: self.paging.top,
            skip: self.paging.skip,
        }
    }
}

/// Arguments of [`crate::CollectionModule::search_nfts`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNftsArgs {
    /// Restrict to these collections
    pub collections: Vec<String>,
    /// Restrict to NFTs held by these addresses
    pub owners: Vec<String>,
    /// Only NFTs listed for sale
    pub only_on_sale: bool,
    /// Only NFTs in an auction
    pub only_auctions: bool,
    /// Only NFTs of verified collections
    pub only_verified: bool,
    /// Listing payment tokens
    pub payment_tokens: Vec<String>,
    /// Listing marketplaces
    pub marketplaces: Vec<String>,
    /// Attribute filters
    pub attributes: Vec<Attribute>,
    /// Listing price range
    pub price_range: Option<Range>,
    /// Rarity rank range
    pub rank_range: Option<Range>,
    /// Free-text name search
    pub search: Option<String>,
    /// Sort order
    pub order_by: Option<NftOrderBy>,
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(SearchNftsArgs, MAX_TOP_EXTENDED);

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NftSearchFilter<'a> {
    filters: NftFilterFields<'a>,
    name: Option<&'a str>,
    order_by: Option<[NftOrderBy; 1]>,
    top: u32,
    skip: u32,
    include_count: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NftFilterFields<'a> {
    collection: &'a [String],
    owner: &'a [String],
    on_sale: bool,
    on_auction: bool,
    verified_only: bool,
    sale_info: SaleInfoFilter<'a>,
    metadata: MetadataFilter<'a>,
    range: Vec<RangeFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaleInfoFilter<'a> {
    payment_token: &'a [String],
    marketplace: &'a [String],
}

#[derive(Debug, Serialize)]
struct MetadataFilter<'a> {
    attributes: &'a [Attribute],
}

impl SearchNftsArgs {
    pub(crate) fn filter(&self) -> NftSearchFilter<'_> {
        let range = [
            range_filter("saleInfo.minBidShort", self.price_range),
            range_filter("metadata.rarity.rank", self.rank_range),
        ]
        .into_iter()
        .flatten()
        .collect();

        NftSearchFilter {
            filters: NftFilterFields {
                collection: &self.collections,
                owner: &self.owners,
                on_sale: self.only_on_sale,
                on_auction: self.only_auctions,
                verified_only: self.only_verified,
                sale_info: SaleInfoFilter {
                    payment_token: &self.payment_tokens,
                    marketplace: &self.marketplaces,
                },
                metadata: MetadataFilter {
                    attributes: &self.attributes,
                },
                range,
            },
            name: self.search.as_deref(),
            order_by: self.order_by.map(|o| [o]),
            top: self.paging.top,
            skip: self.paging.skip,
            include_count: true,
        }
    }
}

/// Arguments of [`crate::CollectionModule::get_trading_activity`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingActivityArgs {
    /// Restrict to these collections
    pub collections: Vec<String>,
    /// Restrict to these NFTs
    pub identifiers: Vec<String>,
    /// Restrict to activity involving these addresses
    pub addresses: Vec<String>,
    /// Restrict to these activity kinds
    pub activity_types: Vec<ActivityType>,
    /// Restrict to these marketplaces
    pub marketplaces: Vec<String>,
    /// Restrict to these payment tokens
    pub payment_tokens: Vec<String>,
    /// Value range in EGLD
    pub price_range: Option<Range>,
    /// Time window
    pub time_range: Option<TimeRange>,
    /// Sort order
    pub order_by: Option<ActivityOrderBy>,
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(TradingActivityArgs, MAX_TOP_EXTENDED);

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActivityFilter<'a> {
    filters: ActivityFilterFields<'a>,
    order_by: Option<[ActivityOrderBy; 1]>,
    top: u32,
    skip: u32,
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityFilterFields<'a> {
    collection: &'a [String],
    identifier: &'a [String],
    address: &'a [String],
    activity_type: &'a [ActivityType],
    marketplace: &'a [String],
    payment_token: &'a [String],
    range: Vec<RangeFilter>,
    timestamp: Option<TimeRange>,
}

impl TradingActivityArgs {
    pub(crate) fn filter(&self) -> ActivityFilter<'_> {
        ActivityFilter {
            filters: ActivityFilterFields {
                collection: &self.collections,
                identifier: &self.identifiers,
                address: &self.addresses,
                activity_type: &self.activity_types,
                marketplace: &self.marketplaces,
                payment_token: &self.payment_tokens,
                range: range_filter("activityData.egldValue", self.price_range)
                    .into_iter()
                    .collect(),
                timestamp: self.time_range,
            },
            order_by: self.order_by.map(|o| [o]),
            top: self.paging.top,
            skip: self.paging.skip,
        }
    }
}

/// Arguments of [`crate::CollectionModule::get_global_offers`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalOffersArgs {
    /// Restrict to these collections
    pub collections: Vec<String>,
    /// Restrict to offers made by these addresses
    pub owners: Vec<String>,
    /// Restrict to these offer ids
    pub offer_ids: Vec<u64>,
    /// Attribute filters
    pub attributes: Vec<Attribute>,
    /// Restrict to these payment tokens
    pub payment_tokens: Vec<String>,
    /// Offer price range
    pub price_range: Option<Range>,
    /// Only offers still backed by the owner's deposit
    pub only_active: bool,
    /// Sort order
    pub order_by: Option<OfferOrderBy>,
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(GlobalOffersArgs, MAX_TOP_STANDARD);

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GlobalOffersFilter<'a> {
    filters: GlobalOffersFilterFields<'a>,
    order_by: Option<[OfferOrderBy; 1]>,
    top: u32,
    skip: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GlobalOffersFilterFields<'a> {
    collection: &'a [String],
    owner: &'a [String],
    offer_id: &'a [u64],
    attributes: &'a [Attribute],
    payment_token: &'a [String],
    is_active: bool,
    range: Vec<RangeFilter>,
}

impl GlobalOffersArgs {
    pub(crate) fn filter(&self) -> GlobalOffersFilter<'_> {
        GlobalOffersFilter {
            filters: GlobalOffersFilterFields {
                collection: &self.collections,
                owner: &self.owners,
                offer_id: &self.offer_ids,
                attributes: &self.attributes,
                payment_token: &self.payment_tokens,
                is_active: self.only_active,
                range: range_filter("priceShort", self.price_range)
                    .into_iter()
                    .collect(),
            },
            order_by: self.order_by.map(|o| [o]),
            top: self.paging.top,
            skip: self.paging.skip,
        }
    }
}

/// Arguments of [`crate::NftModule::get_nft_offers`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOffersArgs {
    /// Restrict to offers on these NFTs
    pub identifiers: Vec<String>,
    /// Restrict to offers on these collections
    pub collections: Vec<String>,
    /// Restrict to offers made by these addresses
    pub offer_makers: Vec<String>,
    /// Restrict to offers on NFTs held by these addresses
    pub nft_owners: Vec<String>,
    /// Restrict to these payment tokens
    pub payment_tokens: Vec<String>,
    /// Offer price range
    pub price_range: Option<Range>,
    /// Only offers that have not expired
    pub only_active: bool,
    /// Sort order
    pub order_by: Option<OfferOrderBy>,
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(NftOffersArgs, MAX_TOP_STANDARD);

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NftOffersFilter<'a> {
    filters: NftOffersFilterFields<'a>,
    order_by: Option<[OfferOrderBy; 1]>,
    top: u32,
    skip: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NftOffersFilterFields<'a> {
    identifier: &'a [String],
    collection: &'a [String],
    owner: &'a [String],
    nft_owner: &'a [String],
    payment_token: &'a [String],
    is_active: bool,
    range: Vec<RangeFilter>,
}

impl NftOffersArgs {
    pub(crate) fn filter(&self) -> NftOffersFilter<'_> {
        NftOffersFilter {
            filters: NftOffersFilterFields {
                identifier: &self.identifiers,
                collection: &self.collections,
                owner: &self.offer_makers,
                nft_owner: &self.nft_owners,
                payment_token: &self.payment_tokens,
                is_active: self.only_active,
                range: range_filter("priceShort", self.price_range)
                    .into_iter()
                    .collect(),
            },
            order_by: self.order_by.map(|o| [o]),
            top: self.paging.top,
            skip: self.paging.skip,
        }
    }
}

/// Arguments of [`crate::CommonModule::global_search`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSearchArgs {
    /// Search text
    pub search: String,
    /// Page size and offset, applied per result category
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(GlobalSearchArgs, MAX_TOP_EXTENDED);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GlobalSearchFilter<'a> {
    name: &'a str,
    top: u32,
    skip: u32,
}

impl GlobalSearchArgs {
    /// Search for `search` with default paging
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            paging: Paging::default(),
        }
    }

    pub(crate) fn filter(&self) -> GlobalSearchFilter<'_> {
        GlobalSearchFilter {
            name: &self.search,
            top: self.paging.top,
            skip: self.paging.skip,
        }
    }
}

/// Arguments of [`crate::NftModule::get_daily_trending`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyTrendingArgs {
    /// Page size and offset
    #[serde(flatten)]
    pub paging: Paging,
}

paginated_args!(DailyTrendingArgs, MAX_TOP_STANDARD);
