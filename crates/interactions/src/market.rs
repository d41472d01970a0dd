// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Marketplace contract interaction
//!
//! Builds unsigned transactions for listings, purchases, bids, custom and
//! global offers and deposits, and decodes the contract's view functions.

use std::{collections::HashMap, fmt, str::FromStr};

use alloy_primitives::U256;
use api_client::ClientConfig;
use shared_types::ContractCategory;
use tracing::{debug, instrument};

use crate::{
    abi::AbiLoader,
    address::Address,
    cache::AbiCache,
    contract::SmartContract,
    error::{InteractionError, InteractionResult},
    provider::{GatewayProvider, QueryProvider},
    records::{AuctionInfo, CustomOffer, GlobalOffer, TokenDecimals, TokenPayment},
    transaction::{Operation, Payment, TokenTransfer, TransactionDraft, TxContext},
    types::TypedValue,
};

/// Marketplaces whose listings are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MarketplaceId {
    Xoxno,
    FrameIt,
    DeadRare,
    Krogan,
}

impl MarketplaceId {
    #[allow(missing_docs)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xoxno => "xoxno",
            Self::FrameIt => "frameit",
            Self::DeadRare => "deadrare",
            Self::Krogan => "krogan",
        }
    }

    /// Only listings on the native marketplace can be traded directly
    pub fn ensure_tradable(self) -> InteractionResult<()> {
        match self {
            Self::Xoxno => Ok(()),
            other => Err(InteractionError::unsupported(format!(
                "direct trading on {other} is not supported"
            ))),
        }
    }
}

impl fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketplaceId {
    type Err = InteractionError;

    /// Accepts names and the short codes used by the marketplace API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xoxno" | "xo" => Ok(Self::Xoxno),
            "frameit" | "fm" => Ok(Self::FrameIt),
            "deadrare" | "dr" => Ok(Self::DeadRare),
            "krogan" | "kg" => Ok(Self::Krogan),
            _ => Err(InteractionError::unsupported(format!("unknown marketplace {s}"))),
        }
    }
}

/// New listing of one NFT or SFT batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListing {
    /// Token being listed
    pub nft: TokenTransfer,
    /// `EGLD` or an accepted ESDT
    pub payment_token: String,
    /// Fixed price, or starting bid for auctions
    pub min_bid: U256,
    /// Buy-out price for auctions, zero for none
    pub max_bid: U256,
    /// Unix seconds, zero for none
    pub deadline: u64,
    /// Bidding instead of fixed price
    pub is_auction: bool,
    /// SFT batches sold one unit per payment
    pub one_per_payment: bool,
    /// Unix seconds, zero to start immediately
    pub start_time: u64,
}

impl NewListing {
    /// Fixed-price listing
    pub fn fixed_price(nft: TokenTransfer, payment_token: impl Into<String>, price: U256) -> Self {
        Self {
            nft,
            payment_token: payment_token.into(),
            min_bid: price,
            max_bid: price,
            deadline: 0,
            is_auction: false,
            one_per_payment: false,
            start_time: 0,
        }
    }

    /// Auction ending at `deadline`
    pub fn auction(
        nft: TokenTransfer,
        payment_token: impl Into<String>,
        min_bid: U256,
        max_bid: Option<U256>,
        deadline: u64,
    ) -> Self {
        Self {
            nft,
            payment_token: payment_token.into(),
            min_bid,
            max_bid: max_bid.unwrap_or(U256::ZERO),
            deadline,
            is_auction: true,
            one_per_payment: false,
            start_time: 0,
        }
    }

    fn validate(&self) -> InteractionResult<()> {
        if self.nft.nonce == 0 {
            return Err(InteractionError::validation(format!(
                "{} is not an NFT or SFT",
                self.nft.token_identifier
            )));
        }
        if self.min_bid.is_zero() {
            return Err(InteractionError::validation("listing price must be positive"));
        }
        if !self.max_bid.is_zero() && self.max_bid < self.min_bid {
            return Err(InteractionError::validation(
                "maximum bid cannot be lower than minimum bid",
            ));
        }
        Ok(())
    }

    fn to_value(&self) -> TypedValue {
        TypedValue::structure(
            "BulkListing",
            vec![
                ("min_bid", TypedValue::BigUint(self.min_bid)),
                ("max_bid", TypedValue::BigUint(self.max_bid)),
                ("deadline", TypedValue::U64(self.deadline)),
                (
                    "accepted_payment_token",
                    TypedValue::egld_or_esdt(&self.payment_token),
                ),
                ("bid", TypedValue::Bool(self.is_auction)),
                (
                    "opt_sft_max_one_per_payment",
                    TypedValue::Bool(self.one_per_payment),
                ),
                ("opt_start_time", TypedValue::U64(self.start_time)),
                ("collection", TypedValue::token(&self.nft.token_identifier)),
                ("nonce", TypedValue::U64(self.nft.nonce)),
                ("nft_amount", TypedValue::BigUint(self.nft.amount)),
            ],
        )
    }
}

/// Price or deadline update of an existing listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ListingChange {
    pub auction_id: u64,
    pub payment_token: String,
    pub price: U256,
    pub deadline: u64,
}

/// Offer on one NFT
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewCustomOffer {
    pub collection: String,
    pub nonce: u64,
    pub quantity: U256,
    pub payment_token: String,
    pub payment_nonce: u64,
    pub price: U256,
    /// Unix seconds
    pub deadline: u64,
}

/// Offer on any NFT of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewGlobalOffer {
    pub collection: String,
    pub payment_token: String,
    pub payment_nonce: u64,
    pub price: U256,
    /// Restrict to NFTs with these attributes
    pub attributes: Option<String>,
}

fn price_payment(token: &str, nonce: u64, amount: U256) -> InteractionResult<Payment> {
    if amount.is_zero() {
        return Err(InteractionError::validation("price must be positive"));
    }
    Ok(Payment::from_transfers(vec![TokenTransfer::payment(
        token, nonce, amount,
    )]))
}

fn ids(values: &[u64]) -> TypedValue {
    TypedValue::Variadic(values.iter().copied().map(TypedValue::U64).collect())
}

/// Builds marketplace transactions and reads marketplace state
#[derive(Debug, Clone)]
pub struct MarketInteraction<P = GatewayProvider> {
    contract: SmartContract,
    provider: P,
    decimals: TokenDecimals,
}

impl MarketInteraction<GatewayProvider> {
    /// Interaction with the configured market contract, ABI served from `cache`
    pub async fn load(
        config: &ClientConfig,
        cache: &AbiCache,
        loader: &AbiLoader,
    ) -> InteractionResult<Self> {
        let address = Address::from_bech32(&config.contract_addresses.market)?;
        let abi = cache.get_or_load(ContractCategory::Market, loader).await?;
        Ok(Self::new(
            SmartContract::new(address, abi, config.chain),
            GatewayProvider::new(config)?,
        ))
    }
}

impl<P: QueryProvider> MarketInteraction<P> {
    #[allow(missing_docs)]
    pub fn new(contract: SmartContract, provider: P) -> Self {
        Self {
            contract,
            provider,
            decimals: TokenDecimals::default(),
        }
    }

    /// Replace the decimals table used for display amounts
    pub fn with_decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = decimals;
        self
    }

    #[allow(missing_docs)]
    pub fn contract(&self) -> &SmartContract {
        &self.contract
    }

    fn draft(
        &self,
        ctx: &TxContext,
        endpoint: &str,
        args: &[TypedValue],
        payment: Payment,
        gas_limit: u64,
    ) -> InteractionResult<TransactionDraft> {
        debug!(endpoint, gas_limit, "Building market transaction");
        Ok(self
            .contract
            .call(endpoint, args, payment, gas_limit)?
            .build(ctx))
    }

    /// List one or more NFTs in a single transaction
    pub fn list_nfts(
        &self,
        ctx: &TxContext,
        listings: &[NewListing],
    ) -> InteractionResult<TransactionDraft> {
        if listings.is_empty() {
            return Err(InteractionError::validation("nothing to list"));
        }
        for listing in listings {
            listing.validate()?;
        }

        let payment = Payment::from_transfers(listings.iter().map(|l| l.nft.clone()).collect());
        let args = [TypedValue::Variadic(
            listings.iter().map(NewListing::to_value).collect(),
        )];
        self.draft(
            ctx,
            "listing",
            &args,
            payment,
            Operation::List.gas_limit(listings.len()),
        )
    }

    /// Withdraw listings and return the NFTs to their owner
    pub fn withdraw_auctions(
        &self,
        ctx: &TxContext,
        auction_ids: &[u64],
    ) -> InteractionResult<TransactionDraft> {
        if auction_ids.is_empty() {
            return Err(InteractionError::validation("no auctions to withdraw"));
        }
        self.draft(
            ctx,
            "withdraw",
            &[ids(auction_ids)],
            Payment::None,
            Operation::Withdraw.gas_limit(auction_ids.len()),
        )
    }

    /// Settle a finished auction
    pub fn end_auction(
        &self,
        ctx: &TxContext,
        auction_id: u64,
    ) -> InteractionResult<TransactionDraft> {
        self.draft(
            ctx,
            "endAuction",
            &[ids(&[auction_id])],
            Payment::None,
            Operation::EndAuction.gas_limit(1),
        )
    }

    /// Buy `quantity` units (one by default) of a listing
    pub fn buy(
        &self,
        ctx: &TxContext,
        auction: &AuctionInfo,
        quantity: Option<U256>,
    ) -> InteractionResult<TransactionDraft> {
        let unit_price = if auction.auction_type.is_bid() {
            auction.max_bid.as_ref().ok_or_else(|| {
                InteractionError::validation(format!(
                    "auction {} has no buy-out price",
                    auction.auction_id
                ))
            })?
        } else {
            &auction.min_bid
        };

        let units = quantity.unwrap_or(U256::from(1u64));
        if units.is_zero() || units > auction.quantity {
            return Err(InteractionError::validation(format!(
                "quantity must be between 1 and {}",
                auction.quantity
            )));
        }
        let total = unit_price
            .amount
            .checked_mul(units)
            .ok_or_else(|| InteractionError::validation("total price overflows"))?;

        let args = [
            TypedValue::U64(auction.auction_id),
            TypedValue::token(&auction.collection),
            TypedValue::U64(auction.nonce),
            TypedValue::optional(quantity.map(TypedValue::BigUint)),
        ];
        self.draft(
            ctx,
            "buy",
            &args,
            price_payment(&unit_price.token_identifier, unit_price.token_nonce, total)?,
            Operation::Buy.gas_limit(1),
        )
    }

    /// Look up a listing on `marketplace` and buy it
    #[instrument(skip(self, ctx), fields(sender = %ctx.sender))]
    pub async fn buy_auction_by_id(
        &self,
        ctx: &TxContext,
        marketplace: &str,
        auction_id: u64,
        quantity: Option<U256>,
    ) -> InteractionResult<TransactionDraft> {
        marketplace.parse::<MarketplaceId>()?.ensure_tradable()?;
        let auction = self
            .get_auction_info(auction_id)
            .await?
            .ok_or_else(|| {
                InteractionError::validation(format!("auction {auction_id} not found"))
            })?;
        self.buy(ctx, &auction, quantity)
    }

    /// Bid `amount` on an auction
    pub fn bid(
        &self,
        ctx: &TxContext,
        auction: &AuctionInfo,
        amount: U256,
    ) -> InteractionResult<TransactionDraft> {
        if !auction.auction_type.is_bid() {
            return Err(InteractionError::validation(format!(
                "auction {} is a fixed-price listing",
                auction.auction_id
            )));
        }
        if amount < auction.min_bid.amount || amount <= auction.current_bid.amount {
            return Err(InteractionError::validation(format!(
                "bid must be at least {} and above the current bid {}",
                auction.min_bid.amount, auction.current_bid.amount
            )));
        }

        let args = [
            TypedValue::U64(auction.auction_id),
            TypedValue::token(&auction.collection),
            TypedValue::U64(auction.nonce),
        ];
        self.draft(
            ctx,
            "bid",
            &args,
            price_payment(
                &auction.min_bid.token_identifier,
                auction.min_bid.token_nonce,
                amount,
            )?,
            Operation::Bid.gas_limit(1),
        )
    }

    /// Update price, payment token or deadline of listings
    pub fn change_listing(
        &self,
        ctx: &TxContext,
        changes: &[ListingChange],
    ) -> InteractionResult<TransactionDraft> {
        if changes.is_empty() {
            return Err(InteractionError::validation("no listing changes"));
        }
        if changes.iter().any(|c| c.price.is_zero()) {
            return Err(InteractionError::validation("listing price must be positive"));
        }

        let updates = changes
            .iter()
            .map(|c| {
                TypedValue::structure(
                    "BulkUpdateListing",
                    vec![
                        ("payment_token_type", TypedValue::egld_or_esdt(&c.payment_token)),
                        ("new_price", TypedValue::BigUint(c.price)),
                        ("auction_id", TypedValue::U64(c.auction_id)),
                        ("deadline", TypedValue::U64(c.deadline)),
                    ],
                )
            })
            .collect();
        self.draft(
            ctx,
            "changeListing",
            &[TypedValue::Variadic(updates)],
            Payment::None,
            Operation::ChangeListing.gas_limit(changes.len()),
        )
    }

    /// Offer to buy one NFT, paying the price up front
    pub fn send_custom_offer(
        &self,
        ctx: &TxContext,
        offer: &NewCustomOffer,
    ) -> InteractionResult<TransactionDraft> {
        let args = [
            TypedValue::egld_or_esdt(&offer.payment_token),
            TypedValue::U64(offer.payment_nonce),
            TypedValue::BigUint(offer.price),
            TypedValue::token(&offer.collection),
            TypedValue::U64(offer.nonce),
            TypedValue::BigUint(offer.quantity),
            TypedValue::U64(offer.deadline),
        ];
        self.draft(
            ctx,
            "sendOffer",
            &args,
            price_payment(&offer.payment_token, offer.payment_nonce, offer.price)?,
            Operation::SendOffer.gas_limit(1),
        )
    }

    /// Cancel a custom offer and recover the escrowed price
    pub fn withdraw_custom_offer(
        &self,
        ctx: &TxContext,
        offer_id: u64,
    ) -> InteractionResult<TransactionDraft> {
        self.draft(
            ctx,
            "withdrawOffer",
            &[TypedValue::U64(offer_id)],
            Payment::None,
            Operation::WithdrawOffer.gas_limit(1),
        )
    }

    /// Accept a custom offer
    ///
    /// When the NFT is currently listed, pass its `auction_id`: the listing is
    /// withdrawn and the offer accepted in one call. Otherwise the NFT is sent
    /// along with the call.
    pub fn accept_custom_offer(
        &self,
        ctx: &TxContext,
        offer_id: u64,
        nft: TokenTransfer,
        auction_id: Option<u64>,
    ) -> InteractionResult<TransactionDraft> {
        let gas = Operation::AcceptOffer.gas_limit(1);
        match auction_id {
            Some(auction_id) => self.draft(
                ctx,
                "withdrawAuctionAndAcceptOffer",
                &[TypedValue::U64(auction_id), TypedValue::U64(offer_id)],
                Payment::None,
                gas,
            ),
            None => self.draft(
                ctx,
                "acceptOffer",
                &[TypedValue::U64(offer_id)],
                Payment::Single(nft),
                gas,
            ),
        }
    }

    /// Offer `price` for any NFT of a collection
    pub fn send_global_offer(
        &self,
        ctx: &TxContext,
        offer: &NewGlobalOffer,
    ) -> InteractionResult<TransactionDraft> {
        let args = [
            TypedValue::egld_or_esdt(&offer.payment_token),
            TypedValue::U64(offer.payment_nonce),
            TypedValue::BigUint(offer.price),
            TypedValue::token(&offer.collection),
            TypedValue::optional(offer.attributes.as_deref().map(TypedValue::bytes)),
        ];
        self.draft(
            ctx,
            "sendGlobalOffer",
            &args,
            price_payment(&offer.payment_token, offer.payment_nonce, offer.price)?,
            Operation::SendGlobalOffer.gas_limit(1),
        )
    }

    /// Cancel a global offer
    pub fn withdraw_global_offer(
        &self,
        ctx: &TxContext,
        offer_id: u64,
    ) -> InteractionResult<TransactionDraft> {
        self.draft(
            ctx,
            "withdrawGlobalOffer",
            &[TypedValue::U64(offer_id)],
            Payment::None,
            Operation::WithdrawGlobalOffer.gas_limit(1),
        )
    }

    /// Sell `nfts` (and listed `auction_ids`) into a global offer
    pub fn accept_global_offer(
        &self,
        ctx: &TxContext,
        offer_id: u64,
        nfts: &[TokenTransfer],
        auction_ids: &[u64],
    ) -> InteractionResult<TransactionDraft> {
        let count = nfts.len() + auction_ids.len();
        if count == 0 {
            return Err(InteractionError::validation(
                "accepting a global offer needs at least one NFT",
            ));
        }
        self.draft(
            ctx,
            "acceptGlobalOffer",
            &[TypedValue::U64(offer_id), ids(auction_ids)],
            Payment::from_transfers(nfts.to_vec()),
            Operation::AcceptGlobalOffer.gas_limit(count),
        )
    }

    /// Add funds to the caller's deposit pool
    pub fn deposit(
        &self,
        ctx: &TxContext,
        token: &str,
        amount: U256,
    ) -> InteractionResult<TransactionDraft> {
        self.draft(
            ctx,
            "deposit",
            &[],
            price_payment(token, 0, amount)?,
            Operation::Deposit.gas_limit(1),
        )
    }

    /// Withdraw funds from the caller's deposit pool
    pub fn withdraw_deposit(
        &self,
        ctx: &TxContext,
        token: &str,
        amount: U256,
    ) -> InteractionResult<TransactionDraft> {
        if amount.is_zero() {
            return Err(InteractionError::validation("amount must be positive"));
        }
        self.draft(
            ctx,
            "withdrawDeposit",
            &[TypedValue::egld_or_esdt(token), TypedValue::BigUint(amount)],
            Payment::None,
            Operation::WithdrawDeposit.gas_limit(1),
        )
    }

    /// Listing details, `None` when the auction does not exist
    pub async fn get_auction_info(
        &self,
        auction_id: u64,
    ) -> InteractionResult<Option<AuctionInfo>> {
        let value = self
            .contract
            .query_single(
                &self.provider,
                "getFullAuctionData",
                &[TypedValue::U64(auction_id)],
            )
            .await?;
        value
            .as_option()?
            .map(|auction| AuctionInfo::from_value(auction_id, auction, &self.decimals))
            .transpose()
    }

    /// Global offer with its activity resolved
    pub async fn get_global_offer(&self, offer_id: u64) -> InteractionResult<GlobalOffer> {
        let value = self
            .contract
            .query_single(&self.provider, "getGlobalOffer", &[TypedValue::U64(offer_id)])
            .await?;
        let mut offers = vec![GlobalOffer::from_value(&value, &self.decimals)?];
        self.resolve_activity(&mut offers).await?;
        Ok(offers.remove(0))
    }

    /// Several global offers with their activity resolved
    pub async fn get_global_offers(
        &self,
        offer_ids: &[u64],
    ) -> InteractionResult<Vec<GlobalOffer>> {
        let value = self
            .contract
            .query_single(&self.provider, "getGlobalOffers", &[ids(offer_ids)])
            .await?;
        let mut offers = value
            .as_list()?
            .iter()
            .map(|v| GlobalOffer::from_value(v, &self.decimals))
            .collect::<InteractionResult<Vec<_>>>()?;
        self.resolve_activity(&mut offers).await?;
        Ok(offers)
    }

    /// Query deposit balances once per owner for offers that are not escrowed
    async fn resolve_activity(&self, offers: &mut [GlobalOffer]) -> InteractionResult<()> {
        let mut deposits: HashMap<Address, Vec<TokenPayment>> = HashMap::new();
        for offer in offers.iter_mut().filter(|o| !o.new_version) {
            if !deposits.contains_key(&offer.owner) {
                let balances = self.get_user_deposits(offer.owner).await?;
                deposits.insert(offer.owner, balances);
            }
            let balance = deposits
                .get(&offer.owner)
                .and_then(|b| b.iter().find(|p| p.token_identifier == offer.price.token_identifier))
                .map_or(U256::ZERO, |p| p.amount);
            offer.resolve_activity(balance);
        }
        Ok(())
    }

    /// Custom offer details, `None` when the offer does not exist
    pub async fn get_custom_offer(&self, offer_id: u64) -> InteractionResult<Option<CustomOffer>> {
        let value = self
            .contract
            .query_single(&self.provider, "getOffer", &[TypedValue::U64(offer_id)])
            .await?;
        value
            .as_option()?
            .map(|offer| CustomOffer::from_value(offer_id, offer, &self.decimals))
            .transpose()
    }

    /// Every token held in `owner`'s deposit pool
    pub async fn get_user_deposits(&self, owner: Address) -> InteractionResult<Vec<TokenPayment>> {
        let value = self
            .contract
            .query_single(&self.provider, "userDeposit", &[TypedValue::Address(owner)])
            .await?;
        value
            .as_list()?
            .iter()
            .map(|v| TokenPayment::from_value(v, &self.decimals))
            .collect()
    }

    /// Deposit balance of `owner` in `token`, zero when absent
    pub async fn get_user_pool_balance(
        &self,
        owner: Address,
        token: &str,
    ) -> InteractionResult<TokenPayment> {
        Ok(self
            .get_user_deposits(owner)
            .await?
            .into_iter()
            .find(|p| p.token_identifier == token)
            .unwrap_or_else(|| TokenPayment::zero(token)))
    }

    /// Marketplace fee in basis points
    pub async fn get_marketplace_fees(&self) -> InteractionResult<u64> {
        self.contract
            .query_single(&self.provider, "getMarketplaceCutPercentage", &[])
            .await?
            .as_u64()
    }

    /// Payment tokens accepted for listings
    pub async fn get_accepted_tokens(&self) -> InteractionResult<Vec<String>> {
        self.contract
            .query_single(&self.provider, "getAcceptedTokens", &[])
            .await?
            .as_list()?
            .iter()
            .map(|t| t.as_str().map(str::to_string))
            .collect()
    }

    /// Number of active listings
    pub async fn get_listings_count(&self) -> InteractionResult<u64> {
        self.contract
            .query_single(&self.provider, "getListingsCount", &[])
            .await?
            .as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::encode_top,
        contract::tests::{MARKET, OTHER, SENDER, StaticProvider, market_contract},
        transaction::EGLD,
    };

    fn egld(tenths: u64) -> U256 {
        U256::from(tenths) * U256::from(100_000_000_000_000_000u64)
    }

    fn ctx() -> TxContext {
        TxContext::new(SENDER.parse().unwrap()).with_nonce(3)
    }

    fn market(provider: StaticProvider) -> MarketInteraction<StaticProvider> {
        MarketInteraction::new(market_contract(), provider)
    }

    fn auction_value(auction_type: (&str, u8), min_bid: U256, max_bid: Option<U256>) -> TypedValue {
        TypedValue::structure(
            "Auction",
            vec![
                ("auctioned_token_type", TypedValue::token("BANANA-e955fd")),
                ("auctioned_token_nonce", TypedValue::U64(1)),
                ("nr_auctioned_tokens", TypedValue::BigUint(U256::from(1u64))),
                (
                    "auction_type",
                    TypedValue::Enum {
                        name: "AuctionType".into(),
                        variant: auction_type.0.into(),
                        discriminant: auction_type.1,
                        fields: Vec::new(),
                    },
                ),
                ("payment_token_type", TypedValue::egld_or_esdt(EGLD)),
                ("payment_token_nonce", TypedValue::U64(0)),
                ("min_bid", TypedValue::BigUint(min_bid)),
                (
                    "max_bid",
                    TypedValue::Option(max_bid.map(|m| Box::new(TypedValue::BigUint(m)))),
                ),
                ("start_time", TypedValue::U64(1_700_000_000)),
                ("deadline", TypedValue::U64(0)),
                ("original_owner", TypedValue::Address(OTHER.parse().unwrap())),
                ("current_bid", TypedValue::BigUint(U256::ZERO)),
                ("current_winner", TypedValue::Address(Address::ZERO)),
                ("marketplace_cut_percentage", TypedValue::BigUint(U256::from(200u64))),
                ("creator_royalties_percentage", TypedValue::BigUint(U256::from(500u64))),
            ],
        )
    }

    fn some(value: TypedValue) -> Vec<u8> {
        encode_top(&TypedValue::Option(Some(Box::new(value)))).unwrap()
    }

    #[test]
    fn marketplace_ids() {
        assert_eq!("XO".parse::<MarketplaceId>().unwrap(), MarketplaceId::Xoxno);
        assert!(MarketplaceId::Xoxno.ensure_tradable().is_ok());
        for other in ["frameit", "DeadRare", "kg"] {
            let id: MarketplaceId = other.parse().unwrap();
            assert!(matches!(
                id.ensure_tradable().unwrap_err(),
                InteractionError::Unsupported { .. }
            ));
        }
        assert!(matches!(
            "opensea".parse::<MarketplaceId>().unwrap_err(),
            InteractionError::Unsupported { .. }
        ));
    }

    #[test]
    fn list_single_nft() {
        let market = market(StaticProvider::default());
        let listing =
            NewListing::fixed_price(TokenTransfer::nft("BANANA-e955fd", 1), EGLD, egld(15));
        let draft = market.list_nfts(&ctx(), &[listing]).unwrap();

        assert!(draft.data.starts_with("ESDTNFTTransfer@42414e414e412d653935356664@01@01@"));
        assert!(draft.data.contains("@6c697374696e67@"));
        assert_eq!(draft.receiver.to_string(), SENDER);
        assert_eq!(draft.gas_limit, 20_000_000);
        assert_eq!(draft.nonce, Some(3));
    }

    #[test]
    fn list_many_uses_multi_transfer() {
        let market = market(StaticProvider::default());
        let listings: Vec<_> = (1..=3)
            .map(|n| {
                NewListing::fixed_price(TokenTransfer::nft("BANANA-e955fd", n), EGLD, egld(10))
            })
            .collect();
        let draft = market.list_nfts(&ctx(), &listings).unwrap();

        assert!(draft.data.starts_with("MultiESDTNFTTransfer@"));
        assert_eq!(draft.gas_limit, 30_000_000);
    }

    #[test]
    fn listing_validation() {
        let market = market(StaticProvider::default());
        assert!(market.list_nfts(&ctx(), &[]).unwrap_err().is_input_error());

        let fungible = NewListing::fixed_price(
            TokenTransfer::fungible("USDC-c76f1f", U256::from(1u64)),
            EGLD,
            egld(1),
        );
        assert!(market.list_nfts(&ctx(), &[fungible]).unwrap_err().is_input_error());

        let inverted = NewListing::auction(
            TokenTransfer::nft("BANANA-e955fd", 1),
            EGLD,
            egld(10),
            Some(egld(5)),
            1_800_000_000,
        );
        assert!(market.list_nfts(&ctx(), &[inverted]).unwrap_err().is_input_error());
    }

    #[test]
    fn withdraw_and_end() {
        let market = market(StaticProvider::default());
        let draft = market.withdraw_auctions(&ctx(), &[1, 2]).unwrap();
        assert_eq!(draft.data, "withdraw@01@02");
        assert_eq!(draft.receiver.to_string(), MARKET);
        assert_eq!(draft.gas_limit, 25_000_000);

        assert!(market.withdraw_auctions(&ctx(), &[]).is_err());
        assert_eq!(market.end_auction(&ctx(), 7).unwrap().data, "endAuction@07");
    }

    #[tokio::test]
    async fn buy_by_id_queries_auction() {
        let provider = StaticProvider::default().with(
            "getFullAuctionData",
            vec![some(auction_value(("Nft", 1), egld(25), None))],
        );
        let market = market(provider);

        let draft = market
            .buy_auction_by_id(&ctx(), "xoxno", 42, None)
            .await
            .unwrap();
        assert_eq!(draft.data, "buy@2a@42414e414e412d653935356664@01");
        assert_eq!(draft.value, egld(25));
        assert_eq!(draft.receiver.to_string(), MARKET);
        assert_eq!(draft.gas_limit, 20_000_000);

        let calls = market.provider.calls();
        assert_eq!(calls[0].function, "getFullAuctionData");
        assert_eq!(calls[0].args, vec![vec![42]]);
    }

    #[tokio::test]
    async fn buy_by_id_rejects_foreign_marketplace_and_missing_auction() {
        let provider = StaticProvider::default().with("getFullAuctionData", vec![vec![]]);
        let market = market(provider);

        let error = market
            .buy_auction_by_id(&ctx(), "deadrare", 1, None)
            .await
            .unwrap_err();
        assert!(matches!(error, InteractionError::Unsupported { .. }));
        assert!(market.provider.calls().is_empty());

        let error = market
            .buy_auction_by_id(&ctx(), "xoxno", 1, None)
            .await
            .unwrap_err();
        assert!(error.to_string().contains("auction 1 not found"));
    }

    #[tokio::test]
    async fn auction_decoding_and_bids() {
        let provider = StaticProvider::default().with(
            "getFullAuctionData",
            vec![some(auction_value(("NftBid", 4), egld(10), Some(egld(50))))],
        );
        let market = market(provider);
        let auction = market.get_auction_info(9).await.unwrap().unwrap();

        assert_eq!(auction.identifier, "BANANA-e955fd-01");
        assert!(auction.auction_type.is_bid());
        assert!((auction.min_bid.amount_short - 1.0).abs() < f64::EPSILON);
        assert_eq!(auction.max_bid.as_ref().unwrap().amount, egld(50));
        assert_eq!(auction.current_winner, None);
        assert_eq!(auction.marketplace_cut_percentage, 200);

        assert!(market.bid(&ctx(), &auction, egld(5)).unwrap_err().is_input_error());
        let draft = market.bid(&ctx(), &auction, egld(12)).unwrap();
        assert_eq!(draft.value, egld(12));
        assert!(draft.data.starts_with("bid@09@"));

        // Buying an auction pays the buy-out price
        let draft = market.buy(&ctx(), &auction, None).unwrap();
        assert_eq!(draft.value, egld(50));
    }

    #[test]
    fn offers() {
        let market = market(StaticProvider::default());
        let offer = NewCustomOffer {
            collection: "BANANA-e955fd".into(),
            nonce: 1,
            quantity: U256::from(1u64),
            payment_token: "USDC-c76f1f".into(),
            payment_nonce: 0,
            price: U256::from(5_000_000u64),
            deadline: 1_800_000_000,
        };
        let draft = market.send_custom_offer(&ctx(), &offer).unwrap();
        assert!(
            draft
                .data
                .starts_with("ESDTTransfer@555344432d633736663166@4c4b40@73656e644f66666572@")
        );
        assert_eq!(draft.receiver.to_string(), MARKET);

        let nft = TokenTransfer::nft("BANANA-e955fd", 1);
        let accept = market.accept_custom_offer(&ctx(), 4, nft.clone(), None).unwrap();
        assert!(accept.data.starts_with("ESDTNFTTransfer@"));
        let from_listing = market.accept_custom_offer(&ctx(), 4, nft, Some(8)).unwrap();
        assert_eq!(from_listing.data, "withdrawAuctionAndAcceptOffer@08@04");

        assert_eq!(
            market.withdraw_custom_offer(&ctx(), 4).unwrap().data,
            "withdrawOffer@04"
        );
    }

    #[test]
    fn global_offers_and_deposits() {
        let market = market(StaticProvider::default());
        let offer = NewGlobalOffer {
            collection: "BANANA-e955fd".into(),
            payment_token: EGLD.into(),
            payment_nonce: 0,
            price: egld(20),
            attributes: None,
        };
        let draft = market.send_global_offer(&ctx(), &offer).unwrap();
        assert_eq!(
            draft.data,
            "sendGlobalOffer@45474c44@@1bc16d674ec80000@42414e414e412d653935356664"
        );
        assert_eq!(draft.value, egld(20));

        let accept = market
            .accept_global_offer(&ctx(), 6, &[TokenTransfer::nft("BANANA-e955fd", 2)], &[11])
            .unwrap();
        assert!(accept.data.ends_with("@616363657074476c6f62616c4f66666572@06@0b"));
        assert_eq!(accept.gas_limit, 35_000_000);
        assert!(market.accept_global_offer(&ctx(), 6, &[], &[]).is_err());

        assert_eq!(market.deposit(&ctx(), EGLD, egld(1)).unwrap().value, egld(1));
        assert!(market.deposit(&ctx(), EGLD, U256::ZERO).is_err());
        assert_eq!(
            market
                .withdraw_deposit(&ctx(), EGLD, egld(10))
                .unwrap()
                .data,
            "withdrawDeposit@45474c44@0de0b6b3a7640000"
        );
    }

    fn global_offer(offer_id: u64, new_version: bool, price: U256) -> TypedValue {
        TypedValue::structure(
            "GlobalOffer",
            vec![
                ("offer_id", TypedValue::U64(offer_id)),
                ("collection", TypedValue::token("BANANA-e955fd")),
                ("quantity", TypedValue::U64(1)),
                ("payment_token", TypedValue::egld_or_esdt(EGLD)),
                ("payment_nonce", TypedValue::U64(0)),
                ("price", TypedValue::BigUint(price)),
                ("timestamp", TypedValue::U64(1_700_000_000)),
                ("owner", TypedValue::Address(OTHER.parse().unwrap())),
                ("attributes", TypedValue::Option(None)),
                ("new_version", TypedValue::Bool(new_version)),
            ],
        )
    }

    fn deposit(amount: U256) -> Vec<u8> {
        encode_top(&TypedValue::structure(
            "EgldOrEsdtTokenPayment",
            vec![
                ("token_identifier", TypedValue::egld_or_esdt(EGLD)),
                ("token_nonce", TypedValue::U64(0)),
                ("amount", TypedValue::BigUint(amount)),
            ],
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn global_offer_activity_depends_on_deposit() {
        let provider = StaticProvider::default()
            .with(
                "getGlobalOffers",
                vec![
                    encode_top(&global_offer(1, false, egld(20))).unwrap(),
                    encode_top(&global_offer(2, false, egld(5))).unwrap(),
                    encode_top(&global_offer(3, true, egld(100))).unwrap(),
                ],
            )
            .with("userDeposit", vec![deposit(egld(10))]);
        let market = market(provider);

        let offers = market.get_global_offers(&[1, 2, 3]).await.unwrap();
        assert!(!offers[0].is_active);
        assert!(offers[1].is_active);
        assert!(offers[2].is_active);

        // One deposit lookup for the shared owner
        let deposit_calls = market
            .provider
            .calls()
            .iter()
            .filter(|c| c.function == "userDeposit")
            .count();
        assert_eq!(deposit_calls, 1);
    }

    #[tokio::test]
    async fn simple_views() {
        let provider = StaticProvider::default()
            .with("getMarketplaceCutPercentage", vec![vec![0x01, 0xf4]])
            .with("getAcceptedTokens", vec![b"EGLD".to_vec(), b"USDC-c76f1f".to_vec()])
            .with("getListingsCount", vec![vec![0x03, 0xe8]])
            .with("userDeposit", vec![deposit(egld(30))])
            .with("getOffer", vec![vec![]]);
        let market = market(provider);

        assert_eq!(market.get_marketplace_fees().await.unwrap(), 500);
        assert_eq!(
            market.get_accepted_tokens().await.unwrap(),
            vec!["EGLD".to_string(), "USDC-c76f1f".to_string()]
        );
        assert_eq!(market.get_listings_count().await.unwrap(), 1000);

        let owner: Address = OTHER.parse().unwrap();
        let balance = market.get_user_pool_balance(owner, EGLD).await.unwrap();
        assert!((balance.amount_short - 3.0).abs() < f64::EPSILON);
        let none = market.get_user_pool_balance(owner, "USDC-c76f1f").await.unwrap();
        assert_eq!(none.amount, U256::ZERO);

        assert!(market.get_custom_offer(1).await.unwrap().is_none());
    }
}
