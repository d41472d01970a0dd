// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Records decoded from marketplace contract queries
//!
//! Amounts keep the raw on-chain integer next to a decimal-shifted `f64`
//! for display.

use std::collections::HashMap;

use alloy_primitives::U256;
use serde::Serialize;
use shared_types::get_identifier_from_col_and_nonce;

use crate::{
    address::Address,
    error::{InteractionError, InteractionResult},
    transaction::EGLD,
    types::TypedValue,
};

/// Decimals used when a token is not registered
pub const DEFAULT_DECIMALS: u8 = 18;

/// Number of decimals per token identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDecimals {
    decimals: HashMap<String, u8>,
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self {
            decimals: HashMap::from([(EGLD.to_string(), 18)]),
        }
    }
}

impl TokenDecimals {
    /// Register `decimals` for `token`
    pub fn with(mut self, token: impl Into<String>, decimals: u8) -> Self {
        self.decimals.insert(token.into(), decimals);
        self
    }

    /// Decimals of `token`, [`DEFAULT_DECIMALS`] when unknown
    pub fn get(&self, token: &str) -> u8 {
        self.decimals.get(token).copied().unwrap_or(DEFAULT_DECIMALS)
    }

    /// `amount` shifted by the decimals of `token`
    pub fn shorten(&self, token: &str, amount: U256) -> f64 {
        to_f64(amount) / 10f64.powi(i32::from(self.get(token)))
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(amount: U256) -> f64 {
    const LIMB: f64 = 18_446_744_073_709_551_616.0;
    amount
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * LIMB + *limb as f64)
}

/// Token amount with its display value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayment {
    /// `EGLD` or an ESDT identifier
    pub token_identifier: String,
    #[allow(missing_docs)]
    pub token_nonce: u64,
    /// Raw amount in the token's smallest unit
    #[serde(serialize_with = "serialize_decimal")]
    pub amount: U256,
    /// `amount` divided by `10^decimals`
    pub amount_short: f64,
}

fn serialize_decimal<S: serde::Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl TokenPayment {
    #[allow(missing_docs)]
    pub fn new(
        token: impl Into<String>,
        nonce: u64,
        amount: U256,
        decimals: &TokenDecimals,
    ) -> Self {
        let token_identifier = token.into();
        let amount_short = decimals.shorten(&token_identifier, amount);
        Self {
            token_identifier,
            token_nonce: nonce,
            amount,
            amount_short,
        }
    }

    /// Zero amount of `token`
    pub fn zero(token: impl Into<String>) -> Self {
        Self {
            token_identifier: token.into(),
            token_nonce: 0,
            amount: U256::ZERO,
            amount_short: 0.0,
        }
    }

    /// Decode an `EgldOrEsdtTokenPayment` struct
    pub fn from_value(value: &TypedValue, decimals: &TokenDecimals) -> InteractionResult<Self> {
        Ok(Self::new(
            value.field("token_identifier")?.as_str()?,
            value.field("token_nonce")?.as_u64()?,
            value.field("amount")?.as_biguint()?,
            decimals,
        ))
    }
}

/// Listing kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub enum AuctionType {
    None,
    Nft,
    SftAll,
    SftOnePerPayment,
    NftBid,
}

impl AuctionType {
    fn from_variant(name: &str) -> InteractionResult<Self> {
        match name {
            "None" => Ok(Self::None),
            "Nft" => Ok(Self::Nft),
            "SftAll" => Ok(Self::SftAll),
            "SftOnePerPayment" => Ok(Self::SftOnePerPayment),
            "NftBid" => Ok(Self::NftBid),
            other => Err(InteractionError::codec(format!("unknown auction type {other}"))),
        }
    }

    /// Whether buyers place bids instead of paying a fixed price
    pub fn is_bid(self) -> bool {
        matches!(self, Self::NftBid)
    }
}

/// Listing on the marketplace contract
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionInfo {
    #[allow(missing_docs)]
    pub auction_id: u64,
    /// Collection ticker
    pub collection: String,
    #[allow(missing_docs)]
    pub nonce: u64,
    /// `collection-nonce` identifier
    pub identifier: String,
    /// Number of units listed
    #[serde(serialize_with = "serialize_decimal")]
    pub quantity: U256,
    #[allow(missing_docs)]
    pub auction_type: AuctionType,
    /// Fixed price, or starting bid for auctions
    pub min_bid: TokenPayment,
    /// Buy-out price
    pub max_bid: Option<TokenPayment>,
    #[allow(missing_docs)]
    pub current_bid: TokenPayment,
    #[allow(missing_docs)]
    pub start_time: u64,
    /// Zero when the listing has no end
    pub deadline: u64,
    /// Seller
    pub original_owner: Address,
    /// Highest bidder, if any
    pub current_winner: Option<Address>,
    /// Basis points
    pub marketplace_cut_percentage: u64,
    /// Basis points
    pub creator_royalties_percentage: u64,
}

impl AuctionInfo {
    /// Decode an `Auction` struct returned for `auction_id`
    pub fn from_value(
        auction_id: u64,
        value: &TypedValue,
        decimals: &TokenDecimals,
    ) -> InteractionResult<Self> {
        let collection = value.field("auctioned_token_type")?.as_str()?.to_string();
        let nonce = value.field("auctioned_token_nonce")?.as_u64()?;
        let payment_token = value.field("payment_token_type")?.as_str()?;
        let payment_nonce = value.field("payment_token_nonce")?.as_u64()?;
        let payment =
            |amount: U256| TokenPayment::new(payment_token, payment_nonce, amount, decimals);

        let max_bid = value
            .field("max_bid")?
            .as_option()?
            .map(TypedValue::as_biguint)
            .transpose()?
            .filter(|amount| !amount.is_zero())
            .map(payment);
        let winner = value.field("current_winner")?.as_address()?;

        Ok(Self {
            auction_id,
            identifier: get_identifier_from_col_and_nonce(&collection, nonce),
            collection,
            nonce,
            quantity: value.field("nr_auctioned_tokens")?.as_biguint()?,
            auction_type: AuctionType::from_variant(value.field("auction_type")?.variant()?)?,
            min_bid: payment(value.field("min_bid")?.as_biguint()?),
            max_bid,
            current_bid: payment(value.field("current_bid")?.as_biguint()?),
            start_time: value.field("start_time")?.as_u64()?,
            deadline: value.field("deadline")?.as_u64()?,
            original_owner: value.field("original_owner")?.as_address()?,
            current_winner: (winner != Address::ZERO).then_some(winner),
            marketplace_cut_percentage: value.field("marketplace_cut_percentage")?.as_u64()?,
            creator_royalties_percentage: value.field("creator_royalties_percentage")?.as_u64()?,
        })
    }
}

/// Collection-wide offer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalOffer {
    #[allow(missing_docs)]
    pub offer_id: u64,
    #[allow(missing_docs)]
    pub collection: String,
    /// Number of NFTs wanted
    pub quantity: u64,
    /// Price per NFT
    pub price: TokenPayment,
    #[allow(missing_docs)]
    pub timestamp: u64,
    #[allow(missing_docs)]
    pub owner: Address,
    /// Required NFT attributes, if restricted
    pub attributes: Option<String>,
    /// Funds are escrowed by the contract
    pub new_version: bool,
    /// Whether the offer can currently be accepted
    pub is_active: bool,
}

impl GlobalOffer {
    /// Decode a `GlobalOffer` struct
    ///
    /// `is_active` starts out equal to `new_version`; offers funded from the
    /// owner's deposit are resolved by [`Self::resolve_activity`].
    pub fn from_value(value: &TypedValue, decimals: &TokenDecimals) -> InteractionResult<Self> {
        let new_version = value.field("new_version")?.as_bool()?;
        let attributes = value
            .field("attributes")?
            .as_option()?
            .map(|a| a.as_bytes().map(|b| String::from_utf8_lossy(b).into_owned()))
            .transpose()?;

        Ok(Self {
            offer_id: value.field("offer_id")?.as_u64()?,
            collection: value.field("collection")?.as_str()?.to_string(),
            quantity: value.field("quantity")?.as_u64()?,
            price: TokenPayment::new(
                value.field("payment_token")?.as_str()?,
                value.field("payment_nonce")?.as_u64()?,
                value.field("price")?.as_biguint()?,
                decimals,
            ),
            timestamp: value.field("timestamp")?.as_u64()?,
            owner: value.field("owner")?.as_address()?,
            attributes,
            new_version,
            is_active: new_version,
        })
    }

    /// Set `is_active` from the owner's deposit balance in the price token
    ///
    /// Escrowed offers stay active regardless of the balance.
    pub fn resolve_activity(&mut self, deposit_balance: U256) {
        self.is_active = self.new_version || self.price.amount <= deposit_balance;
    }
}

/// Offer on a single NFT
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOffer {
    #[allow(missing_docs)]
    pub offer_id: u64,
    #[allow(missing_docs)]
    pub collection: String,
    #[allow(missing_docs)]
    pub nonce: u64,
    #[allow(missing_docs)]
    pub identifier: String,
    #[serde(serialize_with = "serialize_decimal")]
    #[allow(missing_docs)]
    pub quantity: U256,
    #[allow(missing_docs)]
    pub price: TokenPayment,
    /// Unix seconds
    pub deadline: u64,
    #[allow(missing_docs)]
    pub timestamp: u64,
    #[allow(missing_docs)]
    pub owner: Address,
    /// Basis points
    pub marketplace_cut_percentage: u64,
}

impl CustomOffer {
    /// Decode an `Offer` struct returned for `offer_id`
    pub fn from_value(
        offer_id: u64,
        value: &TypedValue,
        decimals: &TokenDecimals,
    ) -> InteractionResult<Self> {
        let collection = value.field("offer_token")?.as_str()?.to_string();
        let nonce = value.field("offer_nonce")?.as_u64()?;
        Ok(Self {
            offer_id,
            identifier: get_identifier_from_col_and_nonce(&collection, nonce),
            collection,
            nonce,
            quantity: value.field("offer_amount")?.as_biguint()?,
            price: TokenPayment::new(
                value.field("payment_token")?.as_str()?,
                value.field("payment_nonce")?.as_u64()?,
                value.field("price")?.as_biguint()?,
                decimals,
            ),
            deadline: value.field("deadline")?.as_u64()?,
            timestamp: value.field("timestamp")?.as_u64()?,
            owner: value.field("offer_owner")?.as_address()?,
            marketplace_cut_percentage: value.field("marketplace_cut_percentage")?.as_u64()?,
        })
    }

    /// Whether the offer has expired at `now` (unix seconds)
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.deadline != 0 && self.deadline <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egld(amount: u64) -> U256 {
        U256::from(amount) * U256::from(1_000_000_000_000_000u64)
    }

    #[test]
    fn shortens_by_decimals() {
        let decimals = TokenDecimals::default().with("USDC-c76f1f", 6);
        assert!((decimals.shorten(EGLD, egld(1_500)) - 1.5).abs() < f64::EPSILON);
        let usdc = decimals.shorten("USDC-c76f1f", U256::from(2_500_000u64));
        assert!((usdc - 2.5).abs() < f64::EPSILON);
        assert_eq!(decimals.get("UNKNOWN-abcdef"), DEFAULT_DECIMALS);
        assert!(decimals.shorten(EGLD, U256::MAX) > 1e50);
    }

    fn global_offer_value(new_version: bool, price: U256) -> TypedValue {
        TypedValue::structure(
            "GlobalOffer",
            vec![
                ("offer_id", TypedValue::U64(3)),
                ("collection", TypedValue::token("BANANA-e955fd")),
                ("quantity", TypedValue::U64(1)),
                ("payment_token", TypedValue::egld_or_esdt(EGLD)),
                ("payment_nonce", TypedValue::U64(0)),
                ("price", TypedValue::BigUint(price)),
                ("timestamp", TypedValue::U64(1_700_000_000)),
                ("owner", TypedValue::Address(Address::ZERO)),
                ("attributes", TypedValue::Option(None)),
                ("new_version", TypedValue::Bool(new_version)),
            ],
        )
    }

    #[test]
    fn global_offer_activity_rule() {
        let decimals = TokenDecimals::default();

        let mut escrowed =
            GlobalOffer::from_value(&global_offer_value(true, egld(2_000)), &decimals).unwrap();
        assert!(escrowed.is_active);
        escrowed.resolve_activity(U256::ZERO);
        assert!(escrowed.is_active);

        let mut funded = GlobalOffer::from_value(&global_offer_value(false, egld(2_000)), &decimals)
            .unwrap();
        assert!(!funded.is_active);
        assert!((funded.price.amount_short - 2.0).abs() < f64::EPSILON);

        funded.resolve_activity(egld(1_999));
        assert!(!funded.is_active);
        funded.resolve_activity(egld(2_000));
        assert!(funded.is_active);
    }

    #[test]
    fn custom_offer_expiry() {
        let offer = CustomOffer {
            offer_id: 1,
            collection: "BANANA-e955fd".into(),
            nonce: 1,
            identifier: "BANANA-e955fd-01".into(),
            quantity: U256::from(1u64),
            price: TokenPayment::zero(EGLD),
            deadline: 100,
            timestamp: 0,
            owner: Address::ZERO,
            marketplace_cut_percentage: 200,
        };
        assert!(!offer.is_expired_at(99));
        assert!(offer.is_expired_at(100));
        assert!(
            !CustomOffer {
                deadline: 0,
                ..offer
            }
            .is_expired_at(u64::MAX)
        );
    }
}
