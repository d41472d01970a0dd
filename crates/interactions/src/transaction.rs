// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Unsigned transaction drafts
//!
//! A [`CallBuilder`] turns a contract call plus its payment into a
//! [`TransactionDraft`]: the JSON object a wallet or external signer expects.
//! Token payments are expressed through the built-in transfer functions, so
//! the call data depends on the payment kind:
//!
//! | payment | receiver | data |
//! |---|---|---|
//! | none / EGLD | contract | `func@args` |
//! | one fungible token | contract | `ESDTTransfer@token@amount@func@args` |
//! | one NFT or SFT | sender | `ESDTNFTTransfer@token@nonce@amount@contract@func@args` |
//! | several tokens | sender | `MultiESDTNFTTransfer@contract@count@(token@nonce@amount)…@func@args` |

use alloy_primitives::U256;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DisplayFromStr, serde_as, skip_serializing_none};

use crate::{
    address::Address,
    codec::{biguint_bytes, encode_args, hex_arg},
    error::InteractionResult,
    types::TypedValue,
};

/// Native token identifier as used inside multi-token transfers
pub const EGLD_TRANSFER_ID: &str = "EGLD-000000";

/// Native token ticker
pub const EGLD: &str = "EGLD";

/// Gas price used for every draft
pub const DEFAULT_GAS_PRICE: u64 = 1_000_000_000;

/// Transaction version
pub const TX_VERSION: u32 = 1;

/// Highest gas limit a single transaction may request
pub const MAX_GAS_LIMIT: u64 = 600_000_000;

/// Gas for `base + per_item * count`, capped at [`MAX_GAS_LIMIT`]
pub const fn gas_limit(base: u64, per_item: u64, count: u64) -> u64 {
    let total = base.saturating_add(per_item.saturating_mul(count));
    if total > MAX_GAS_LIMIT {
        MAX_GAS_LIMIT
    } else {
        total
    }
}

/// Base and per-item gas cost of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
    #[allow(missing_docs)]
    pub base: u64,
    #[allow(missing_docs)]
    pub per_item: u64,
}

impl GasSchedule {
    const fn flat(base: u64) -> Self {
        Self { base, per_item: 0 }
    }

    const fn scaled(base: u64, per_item: u64) -> Self {
        Self { base, per_item }
    }

    /// Gas limit for `count` items
    pub const fn limit(self, count: u64) -> u64 {
        gas_limit(self.base, self.per_item, count)
    }
}

/// Operations with a known gas cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Operation {
    List,
    Withdraw,
    ChangeListing,
    Buy,
    Bid,
    EndAuction,
    SendOffer,
    WithdrawOffer,
    AcceptOffer,
    SendGlobalOffer,
    WithdrawGlobalOffer,
    AcceptGlobalOffer,
    Deposit,
    WithdrawDeposit,
    Stake,
    Unstake,
    ClaimRewards,
    ClaimUnstaked,
    Mint,
}

impl Operation {
    /// Gas schedule of this operation
    pub const fn schedule(self) -> GasSchedule {
        match self {
            Self::List | Self::Withdraw | Self::ChangeListing => {
                GasSchedule::scaled(15_000_000, 5_000_000)
            }
            Self::Buy | Self::AcceptOffer => GasSchedule::flat(20_000_000),
            Self::Bid
            | Self::EndAuction
            | Self::SendOffer
            | Self::WithdrawOffer
            | Self::SendGlobalOffer
            | Self::WithdrawGlobalOffer => GasSchedule::flat(15_000_000),
            Self::AcceptGlobalOffer => GasSchedule::scaled(25_000_000, 5_000_000),
            Self::Deposit | Self::WithdrawDeposit | Self::ClaimRewards | Self::ClaimUnstaked => {
                GasSchedule::flat(10_000_000)
            }
            Self::Stake | Self::Unstake => GasSchedule::scaled(10_000_000, 2_500_000),
            Self::Mint => GasSchedule::scaled(10_000_000, 5_000_000),
        }
    }

    /// Gas limit for `count` items
    pub fn gas_limit(self, count: usize) -> u64 {
        self.schedule()
            .limit(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

/// One token moved by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    /// Collection ticker or fungible token identifier
    pub token_identifier: String,
    /// Zero for fungible tokens
    pub nonce: u64,
    #[serde(with = "decimal")]
    #[allow(missing_docs)]
    pub amount: U256,
}

impl TokenTransfer {
    /// Fungible token amount
    pub fn fungible(token_identifier: impl Into<String>, amount: U256) -> Self {
        Self {
            token_identifier: token_identifier.into(),
            nonce: 0,
            amount,
        }
    }

    /// One unit of an NFT
    pub fn nft(collection: impl Into<String>, nonce: u64) -> Self {
        Self::sft(collection, nonce, U256::from(1u64))
    }

    /// `amount` units of a semi-fungible token
    pub fn sft(collection: impl Into<String>, nonce: u64, amount: U256) -> Self {
        Self {
            token_identifier: collection.into(),
            nonce,
            amount,
        }
    }

    /// Native EGLD amount, for use inside multi-token transfers
    pub fn egld(amount: U256) -> Self {
        Self::fungible(EGLD_TRANSFER_ID, amount)
    }

    /// Payment of `amount` in `token`, native when `token` is `EGLD`
    pub fn payment(token: &str, nonce: u64, amount: U256) -> Self {
        if token == EGLD {
            Self::egld(amount)
        } else {
            Self::sft(token, nonce, amount)
        }
    }

    /// Whether this moves native EGLD
    pub fn is_egld(&self) -> bool {
        self.token_identifier == EGLD_TRANSFER_ID || self.token_identifier == EGLD
    }
}

/// Value attached to a call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Payment {
    /// No payment
    #[default]
    None,
    /// Native EGLD
    Native(U256),
    /// One token transfer
    Single(TokenTransfer),
    /// Several token transfers in one call
    Multi(Vec<TokenTransfer>),
}

impl Payment {
    /// Pick the simplest payment form for `transfers`
    pub fn from_transfers(mut transfers: Vec<TokenTransfer>) -> Self {
        match transfers.len() {
            0 => Self::None,
            1 => {
                let transfer = transfers.remove(0);
                if transfer.is_egld() {
                    Self::Native(transfer.amount)
                } else {
                    Self::Single(transfer)
                }
            }
            _ => Self::Multi(transfers),
        }
    }

    /// Identifiers of the tokens paid, `EGLD` for native value
    pub fn token_identifiers(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Native(_) => vec![EGLD],
            Self::Single(t) => vec![token_name(t)],
            Self::Multi(ts) => ts.iter().map(token_name).collect(),
        }
    }
}

fn token_name(transfer: &TokenTransfer) -> &str {
    if transfer.is_egld() {
        EGLD
    } else {
        &transfer.token_identifier
    }
}

/// Sender account and nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    #[allow(missing_docs)]
    pub sender: Address,
    /// Left out of the draft when unknown, for the signer to fill in
    pub nonce: Option<u64>,
}

impl TxContext {
    /// Context for `sender` with the nonce left to the signer
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            nonce: None,
        }
    }

    /// Set the account nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

/// Unsigned transaction
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[allow(missing_docs)]
    pub nonce: Option<u64>,
    /// Native value in the smallest denomination
    #[serde_as(as = "DisplayFromStr")]
    pub value: U256,
    #[allow(missing_docs)]
    pub receiver: Address,
    #[allow(missing_docs)]
    pub sender: Address,
    #[allow(missing_docs)]
    pub gas_price: u64,
    #[allow(missing_docs)]
    pub gas_limit: u64,
    /// Call data, base64-encoded on the wire
    #[serde(with = "base64_data")]
    pub data: String,
    #[allow(missing_docs)]
    #[serde(rename = "chainID")]
    pub chain_id: String,
    #[allow(missing_docs)]
    pub version: u32,
}

/// Builds a [`TransactionDraft`] for one contract call
#[derive(Debug, Clone)]
pub struct CallBuilder {
    contract: Address,
    function: String,
    args: Vec<Vec<u8>>,
    payment: Payment,
    gas_limit: u64,
    chain_id: String,
}

impl CallBuilder {
    /// Call `function` on `contract`
    pub fn new(
        contract: Address,
        function: impl Into<String>,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            contract,
            function: function.into(),
            args: Vec::new(),
            payment: Payment::None,
            gas_limit: 0,
            chain_id: chain_id.into(),
        }
    }

    /// Append typed arguments
    pub fn args(mut self, values: &[TypedValue]) -> InteractionResult<Self> {
        self.args.extend(encode_args(values)?);
        Ok(self)
    }

    /// Append an already encoded argument
    pub fn raw_arg(mut self, bytes: Vec<u8>) -> Self {
        self.args.push(bytes);
        self
    }

    /// Attach a payment
    pub fn payment(mut self, payment: Payment) -> Self {
        self.payment = payment;
        self
    }

    /// Set the gas limit, capped at [`MAX_GAS_LIMIT`]
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit.min(MAX_GAS_LIMIT);
        self
    }

    /// Plain call data `func@args`
    pub fn call_data(&self) -> String {
        std::iter::once(self.function.clone())
            .chain(self.args.iter().map(|a| hex_arg(a)))
            .collect::<Vec<_>>()
            .join("@")
    }

    /// Assemble the draft for `ctx`
    pub fn build(&self, ctx: &TxContext) -> TransactionDraft {
        let call = self.call_data();
        let (receiver, value, data) = match &self.payment {
            Payment::None => (self.contract, U256::ZERO, call),
            Payment::Native(amount) => (self.contract, *amount, call),
            Payment::Single(transfer) if transfer.is_egld() => {
                (self.contract, transfer.amount, call)
            }
            Payment::Single(transfer) if transfer.nonce == 0 => (
                self.contract,
                U256::ZERO,
                format!(
                    "ESDTTransfer@{}@{}@{}",
                    hex_arg(transfer.token_identifier.as_bytes()),
                    hex_arg(&biguint_bytes(transfer.amount)),
                    self.hex_call()
                ),
            ),
            Payment::Single(transfer) => (
                ctx.sender,
                U256::ZERO,
                format!(
                    "ESDTNFTTransfer@{}@{}@{}@{}@{}",
                    hex_arg(transfer.token_identifier.as_bytes()),
                    hex_arg(&biguint_bytes(U256::from(transfer.nonce))),
                    hex_arg(&biguint_bytes(transfer.amount)),
                    self.contract.to_hex(),
                    self.hex_call()
                ),
            ),
            Payment::Multi(transfers) => {
                let mut parts = vec![
                    "MultiESDTNFTTransfer".to_string(),
                    self.contract.to_hex(),
                    hex_arg(&biguint_bytes(U256::from(transfers.len()))),
                ];
                for transfer in transfers {
                    parts.push(hex_arg(transfer.token_identifier.as_bytes()));
                    parts.push(hex_arg(&biguint_bytes(U256::from(transfer.nonce))));
                    parts.push(hex_arg(&biguint_bytes(transfer.amount)));
                }
                parts.push(self.hex_call());
                (ctx.sender, U256::ZERO, parts.join("@"))
            }
        };

        TransactionDraft {
            nonce: ctx.nonce,
            value,
            receiver,
            sender: ctx.sender,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: self.gas_limit,
            data,
            chain_id: self.chain_id.clone(),
            version: TX_VERSION,
        }
    }

    /// Call data with the function name hex-encoded, for use after a transfer
    fn hex_call(&self) -> String {
        std::iter::once(hex_arg(self.function.as_bytes()))
            .chain(self.args.iter().map(|a| hex_arg(a)))
            .collect::<Vec<_>>()
            .join("@")
    }
}

mod base64_data {
    use super::{Deserialize, Deserializer, Engine, STANDARD, Serializer};

    pub(super) fn serialize<S: Serializer>(data: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<String, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = STANDARD.decode(encoded).map_err(serde::de::Error::custom)?;
        String::from_utf8(bytes).map_err(serde::de::Error::custom)
    }
}

mod decimal {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<U256, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SENDER: &str = "erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7";
    const CONTRACT: &str = "erd1qqqqqqqqqqqqqpgq4w46h2at4w46h2at4w46h2at4w46h2at4w4snxnswu";

    fn ctx() -> TxContext {
        TxContext::new(SENDER.parse().unwrap())
    }

    fn builder(function: &str) -> CallBuilder {
        CallBuilder::new(CONTRACT.parse().unwrap(), function, "D")
    }

    #[test]
    fn gas_is_capped() {
        assert_eq!(gas_limit(15_000_000, 5_000_000, 2), 25_000_000);
        assert_eq!(gas_limit(15_000_000, 5_000_000, 1_000), MAX_GAS_LIMIT);
        assert_eq!(gas_limit(u64::MAX, u64::MAX, u64::MAX), MAX_GAS_LIMIT);
        assert_eq!(Operation::Buy.gas_limit(10), 20_000_000);
        assert_eq!(Operation::Stake.gas_limit(2), 15_000_000);
        assert_eq!(Operation::AcceptGlobalOffer.gas_limit(3), 40_000_000);
    }

    #[test]
    fn plain_call() {
        let draft = builder("withdraw")
            .args(&[TypedValue::Variadic(vec![TypedValue::U64(1), TypedValue::U64(0)])])
            .unwrap()
            .gas_limit(20_000_000)
            .build(&ctx().with_nonce(7));

        assert_eq!(draft.data, "withdraw@01@");
        assert_eq!(draft.receiver.to_string(), CONTRACT);
        assert_eq!(draft.value, U256::ZERO);
        assert_eq!(draft.nonce, Some(7));
    }

    #[test]
    fn native_payment_stays_on_contract() {
        let draft = builder("bid")
            .args(&[TypedValue::U64(5)])
            .unwrap()
            .payment(Payment::Native(U256::from(10u64)))
            .build(&ctx());
        assert_eq!(draft.data, "bid@05");
        assert_eq!(draft.value, U256::from(10u64));
        assert_eq!(draft.receiver.to_string(), CONTRACT);
    }

    #[test]
    fn fungible_transfer() {
        let draft = builder("bid")
            .args(&[TypedValue::U64(5)])
            .unwrap()
            .payment(Payment::Single(TokenTransfer::fungible(
                "USDC-c76f1f",
                U256::from(1_000_000u64),
            )))
            .build(&ctx());
        assert_eq!(
            draft.data,
            "ESDTTransfer@555344432d633736663166@0f4240@626964@05"
        );
        assert_eq!(draft.receiver.to_string(), CONTRACT);
    }

    #[test]
    fn nft_transfer_goes_to_sender() {
        let contract: Address = CONTRACT.parse().unwrap();
        let draft = builder("acceptOffer")
            .args(&[TypedValue::U64(9)])
            .unwrap()
            .payment(Payment::Single(TokenTransfer::nft("BANANA-e955fd", 1)))
            .build(&ctx());
        assert_eq!(
            draft.data,
            format!(
                "ESDTNFTTransfer@42414e414e412d653935356664@01@01@{}@6163636570744f66666572@09",
                contract.to_hex()
            )
        );
        assert_eq!(draft.receiver.to_string(), SENDER);
    }

    #[test]
    fn multi_transfer_with_egld() {
        let contract: Address = CONTRACT.parse().unwrap();
        let payment = Payment::from_transfers(vec![
            TokenTransfer::nft("BANANA-e955fd", 2),
            TokenTransfer::egld(U256::ZERO),
        ]);
        let draft = builder("listing").payment(payment).build(&ctx());
        assert_eq!(
            draft.data,
            format!(
                "MultiESDTNFTTransfer@{}@02@42414e414e412d653935356664@02@01@45474c442d303030303030@@@6c697374696e67",
                contract.to_hex()
            )
        );
        assert_eq!(draft.receiver.to_string(), SENDER);
    }

    #[test]
    fn payment_normalisation() {
        assert_eq!(Payment::from_transfers(vec![]), Payment::None);
        assert_eq!(
            Payment::from_transfers(vec![TokenTransfer::payment(EGLD, 0, U256::from(3u64))]),
            Payment::Native(U256::from(3u64))
        );
        assert_eq!(
            Payment::Multi(vec![
                TokenTransfer::egld(U256::ZERO),
                TokenTransfer::nft("BANANA-e955fd", 1)
            ])
            .token_identifiers(),
            vec!["EGLD", "BANANA-e955fd"]
        );
    }

    #[test]
    fn draft_json_shape() {
        let draft = builder("claimRewards")
            .gas_limit(10_000_000)
            .payment(Payment::Native(U256::from(1_000_000_000_000_000_000u64)))
            .build(&ctx());
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            json!({
                "value": "1000000000000000000",
                "receiver": CONTRACT,
                "sender": SENDER,
                "gasPrice": 1_000_000_000u64,
                "gasLimit": 10_000_000,
                "data": "Y2xhaW1SZXdhcmRz",
                "chainID": "D",
                "version": 1
            })
        );
        let back: TransactionDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }
}
