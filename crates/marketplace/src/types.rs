// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Response records returned by the façades
//!
//! Records name the fields callers rely on; anything else the backend sends
//! is kept in `extra` so no data is dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Links published by a collection or user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Socials {
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
}

/// Collection profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionProfile {
    /// Collection ticker
    pub collection: String,
    /// Display name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Profile image URL
    pub profile: Option<String>,
    /// Banner image URL
    pub banner: Option<String>,
    /// Creator or owner address
    pub owner: Option<String>,
    /// Whether the collection is verified
    pub is_verified: bool,
    /// Whether the collection has an active mint
    pub is_mintable: bool,
    /// Whether the collection has staking pools
    pub has_staking: bool,
    /// Social links
    pub socials: Option<Socials>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Trading statistics of a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionStats {
    /// Collection ticker
    pub collection: String,
    /// Current floor price in EGLD
    pub floor_price: Option<f64>,
    /// All-time volume in EGLD
    pub total_volume: Option<f64>,
    /// Volume over the last day in EGLD
    pub day_volume: Option<f64>,
    /// Volume over the last week in EGLD
    pub week_volume: Option<f64>,
    /// Number of trades
    pub total_trades: Option<u64>,
    /// Number of NFTs listed
    pub listed_count: Option<u64>,
    /// Number of distinct holders
    pub holders_count: Option<u64>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One holder of a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Holder {
    /// Holder address
    pub address: String,
    /// Number of NFTs held
    pub count: u64,
    /// Share of the supply held, in percent
    pub weight: Option<f64>,
}

/// Holder breakdown of a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionHolders {
    /// Number of NFTs in the collection
    pub total_supply: Option<u64>,
    /// Number of distinct holders
    pub unique_holders: Option<u64>,
    /// Largest holders
    pub holders: Vec<Holder>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Occurrence statistics for one attribute value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeStats {
    /// Number of NFTs with this value
    pub attribute_occurrence: u64,
    /// Share of the collection with this value, in percent
    pub attribute_frequency: Option<f64>,
    /// Floor price of NFTs with this value
    pub floor_price: Option<f64>,
}

/// Attribute statistics keyed by trait type, then value
pub type CollectionAttributes = HashMap<String, HashMap<String, AttributeStats>>;

/// Price of an item in a payment token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenPrice {
    /// Payment token identifier
    pub token_identifier: String,
    /// Amount as an integer string in the token's smallest unit
    pub amount: Option<String>,
    /// Amount in whole tokens
    pub amount_short: Option<f64>,
    /// Value in USD
    pub usd_value: Option<f64>,
}

/// A launchpad mint stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MintStage {
    /// Stage name
    pub name: String,
    /// Start time as a unix timestamp
    pub start_time: Option<i64>,
    /// End time as a unix timestamp
    pub end_time: Option<i64>,
    /// Prices accepted in this stage
    pub prices: Vec<TokenPrice>,
    /// Per-wallet mint limit
    pub wallet_limit: Option<u64>,
    /// NFTs minted so far in this stage
    pub minted: Option<u64>,
    /// Whether minting requires a whitelist
    pub is_whitelist: bool,
}

/// Launchpad drop information of a collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionMintInfo {
    /// Collection ticker
    pub collection: String,
    /// Minter contract address
    pub contract_address: Option<String>,
    /// Collection size
    pub collection_size: Option<u64>,
    /// NFTs minted so far
    pub total_nfts_minted: Option<u64>,
    /// Mint stages
    pub stages: Vec<MintStage>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Owner of an NFT or offer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Owner {
    pub address: String,
    pub username: Option<String>,
    pub profile: Option<String>,
}

/// NFT attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: Value,
}

/// Rarity information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct Rarity {
    pub rank: Option<u64>,
    pub score: Option<f64>,
}

/// Parsed NFT metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct NftMetadata {
    pub description: Option<String>,
    pub attributes: Vec<NftAttribute>,
    pub rarity: Option<Rarity>,
}

/// Listing details of an NFT on sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleInfo {
    /// Auction id in the marketplace contract
    pub auction_id: Option<u64>,
    /// Seller address
    pub seller: Option<String>,
    /// Minimum bid in the payment token's smallest unit
    pub min_bid: Option<String>,
    /// Minimum bid in whole tokens
    pub min_bid_short: Option<f64>,
    /// Maximum bid (buy-now price) in the payment token's smallest unit
    pub max_bid: Option<String>,
    /// Payment token identifier
    pub payment_token: Option<String>,
    /// Marketplace the listing lives on
    pub marketplace: Option<String>,
    /// Auction type
    pub auction_type: Option<String>,
    /// Auction deadline as a unix timestamp
    pub deadline: Option<i64>,
    /// Quantity listed
    pub quantity: Option<u64>,
}

/// NFT document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftDoc {
    /// Full NFT identifier
    pub identifier: String,
    /// Collection ticker
    pub collection: String,
    /// Nonce within the collection
    pub nonce: u64,
    /// Display name
    pub name: Option<String>,
    /// Current owner
    pub owner: Option<Owner>,
    /// Media URL
    pub url: Option<String>,
    /// Royalties in percent
    pub royalties: Option<f64>,
    /// Parsed metadata
    pub metadata: Option<NftMetadata>,
    /// Listing details, when on sale
    pub sale_info: Option<SaleInfo>,
    /// Whether the NFT is listed
    pub on_sale: bool,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Offer on a single NFT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftOffer {
    /// Offer id in the marketplace contract
    pub offer_id: u64,
    /// NFT the offer is for
    pub identifier: String,
    /// Collection ticker
    pub collection: Option<String>,
    /// Address that made the offer
    pub owner: Option<Owner>,
    /// Price in the payment token's smallest unit
    pub price: Option<String>,
    /// Price in whole tokens
    pub price_short: Option<f64>,
    /// Payment token identifier
    pub payment_token: Option<String>,
    /// Quantity requested
    pub quantity: Option<u64>,
    /// Expiry as a unix timestamp
    pub deadline: Option<i64>,
    /// Whether the offer can still be accepted
    pub is_active: bool,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Collection-wide offer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalOfferDoc {
    /// Offer id in the marketplace contract
    pub offer_id: u64,
    /// Collection ticker
    pub collection: String,
    /// Address that made the offer
    pub owner: Option<Owner>,
    /// Price in the payment token's smallest unit
    pub price: Option<String>,
    /// Price in whole tokens
    pub price_short: Option<f64>,
    /// Payment token identifier
    pub payment_token: Option<String>,
    /// Number of NFTs still wanted
    pub quantity: Option<u64>,
    /// Attribute constraints
    pub attributes: Vec<NftAttribute>,
    /// Whether the offer is backed by the owner's deposit
    pub is_active: bool,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One trading activity entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingActivity {
    /// Transaction hash
    pub tx_hash: String,
    /// Unix timestamp
    pub timestamp: Option<i64>,
    /// Activity kind
    pub activity_type: Option<String>,
    /// Marketplace the activity happened on
    pub source: Option<String>,
    /// Sender
    pub from: Option<Owner>,
    /// Receiver
    pub to: Option<Owner>,
    /// Activity payload (NFT, price)
    pub activity_data: Option<Value>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Account address
    pub address: String,
    /// Herotag
    pub herotag: Option<String>,
    /// Marketplace username
    pub username: Option<String>,
    /// Profile image URL
    pub profile: Option<String>,
    /// Banner image URL
    pub banner: Option<String>,
    /// Biography
    pub description: Option<String>,
    /// Social links
    pub socials: Option<Socials>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Holdings of one collection in a user's inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct InventoryCollection {
    pub collection: String,
    pub name: Option<String>,
    pub count: u64,
    pub floor_price: Option<f64>,
    pub total_value: Option<f64>,
}

/// Token balance of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct TokenBalance {
    pub identifier: String,
    pub balance: String,
    pub decimals: Option<u32>,
    pub short_balance: Option<f64>,
    pub usd_value: Option<f64>,
}

/// Staking pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StakingPool {
    /// Pool id
    pub pool_id: u64,
    /// Collection the pool accepts
    pub collection: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Reward token identifiers
    pub reward_tokens: Vec<String>,
    /// Number of NFTs staked
    pub staked_count: Option<u64>,
    /// Whether the pool accepts new stakes
    pub is_active: bool,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user's position in one staking pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPoolStakingInfo {
    /// Pool id
    pub pool_id: u64,
    /// Staked NFT identifiers
    pub staked: Vec<String>,
    /// NFTs in the unbonding period
    pub unstaked: Vec<String>,
    /// Rewards ready to claim
    pub rewards: Vec<TokenPrice>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Staking summary of a user across pools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStakingSummary {
    /// Per-pool positions
    pub pools: Vec<UserPoolStakingInfo>,
    /// Total number of NFTs staked
    pub total_staked: Option<u64>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A collection offering staking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StakingCollection {
    pub collection: String,
    pub name: Option<String>,
    pub pool_count: Option<u64>,
    pub staked_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payment token accepted by the marketplace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct PaymentToken {
    pub identifier: String,
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub decimals: u32,
    pub usd_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a global search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct GlobalSearchResult {
    pub collections: Vec<Value>,
    pub users: Vec<Value>,
    pub creators: Vec<Value>,
    pub has_more_results: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One bucket of the marketplace volume series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeBucket {
    /// Bucket start, as sent by the server
    pub time: String,
    /// Volume in EGLD
    pub volume: f64,
    /// Volume in USD
    pub volume_usd: Option<f64>,
    /// Number of trades
    pub trades: Option<u64>,
}
