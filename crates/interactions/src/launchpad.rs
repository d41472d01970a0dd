// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Launchpad minter interaction
//!
//! Every launchpad collection is minted through its own minter contract, so
//! the address is passed in instead of read from the network table.

use alloy_primitives::U256;
use api_client::ClientConfig;
use shared_types::ContractCategory;
use tracing::debug;

use crate::{
    abi::AbiLoader,
    address::Address,
    cache::AbiCache,
    contract::SmartContract,
    error::{InteractionError, InteractionResult},
    provider::{GatewayProvider, QueryProvider},
    transaction::{Operation, Payment, TokenTransfer, TransactionDraft, TxContext},
    types::TypedValue,
};

/// Builds mint transactions for one minter contract
#[derive(Debug, Clone)]
pub struct LaunchpadInteraction<P = GatewayProvider> {
    contract: SmartContract,
    provider: P,
}

impl LaunchpadInteraction<GatewayProvider> {
    /// Interaction with the minter at `minter_address`
    pub async fn load(
        config: &ClientConfig,
        cache: &AbiCache,
        loader: &AbiLoader,
        minter_address: &str,
    ) -> InteractionResult<Self> {
        let address = Address::from_bech32(minter_address)?;
        if !address.is_smart_contract() {
            return Err(InteractionError::address(format!(
                "{minter_address} is not a contract address"
            )));
        }
        let abi = cache.get_or_load(ContractCategory::Minter, loader).await?;
        Ok(Self::new(
            SmartContract::new(address, abi, config.chain),
            GatewayProvider::new(config)?,
        ))
    }
}

impl<P: QueryProvider> LaunchpadInteraction<P> {
    #[allow(missing_docs)]
    pub fn new(contract: SmartContract, provider: P) -> Self {
        Self { contract, provider }
    }

    /// Mint `amount` tokens of sale stage `stage`, paying `unit_price` each
    ///
    /// A zero `unit_price` mints without payment.
    pub fn mint(
        &self,
        ctx: &TxContext,
        stage: &str,
        amount: u32,
        unit_price: U256,
        payment_token: &str,
    ) -> InteractionResult<TransactionDraft> {
        if amount == 0 {
            return Err(InteractionError::validation("mint amount must be positive"));
        }
        let total = unit_price
            .checked_mul(U256::from(amount))
            .ok_or_else(|| InteractionError::validation("total price overflows"))?;
        let payment = if total.is_zero() {
            Payment::None
        } else {
            Payment::from_transfers(vec![TokenTransfer::payment(payment_token, 0, total)])
        };
        debug!(stage, amount, %total, "Building mint transaction");

        Ok(self
            .contract
            .call(
                "mint",
                &[TypedValue::bytes(stage), TypedValue::U32(amount)],
                payment,
                Operation::Mint.gas_limit(usize::try_from(amount).unwrap_or(usize::MAX)),
            )?
            .build(ctx))
    }

    /// Number of tokens already minted in `stage`
    pub async fn get_minted_count(&self, stage: &str) -> InteractionResult<u64> {
        self.contract
            .query_single(&self.provider, "getMintedCount", &[TypedValue::bytes(stage)])
            .await?
            .as_u64()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::Chain;

    use super::*;
    use crate::{
        abi::{Abi, tests::MINTER_ABI},
        contract::tests::{SENDER, StaticProvider},
        transaction::EGLD,
    };

    const MINTER: &str = "erd1qqqqqqqqqqqqqpgqalh7lml0alh7lml0alh7lml0alh7lml0alhs9pztkk";

    fn launchpad(provider: StaticProvider) -> LaunchpadInteraction<StaticProvider> {
        let contract = SmartContract::new(
            MINTER.parse().unwrap(),
            Arc::new(Abi::from_json(MINTER_ABI).unwrap()),
            Chain::Devnet,
        );
        LaunchpadInteraction::new(contract, provider)
    }

    fn ctx() -> TxContext {
        TxContext::new(SENDER.parse().unwrap())
    }

    #[test]
    fn mint_pays_for_every_token() {
        let launchpad = launchpad(StaticProvider::default());
        let price = U256::from(500_000_000_000_000_000u64);

        let draft = launchpad.mint(&ctx(), "public", 3, price, EGLD).unwrap();
        assert_eq!(draft.data, "mint@7075626c6963@03");
        assert_eq!(draft.value, U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(draft.receiver.to_string(), MINTER);
        assert_eq!(draft.gas_limit, 25_000_000);

        let esdt = launchpad
            .mint(&ctx(), "public", 2, U256::from(10u64), "USDC-c76f1f")
            .unwrap();
        assert!(esdt.data.starts_with("ESDTTransfer@555344432d633736663166@14@6d696e74@"));
    }

    #[test]
    fn free_and_invalid_mints() {
        let launchpad = launchpad(StaticProvider::default());
        let free = launchpad.mint(&ctx(), "wl", 1, U256::ZERO, EGLD).unwrap();
        assert_eq!(free.value, U256::ZERO);
        assert_eq!(free.data, "mint@776c@01");

        assert!(launchpad.mint(&ctx(), "wl", 0, U256::ZERO, EGLD).unwrap_err().is_input_error());
        assert!(launchpad.mint(&ctx(), "wl", 2, U256::MAX, EGLD).is_err());
    }

    #[tokio::test]
    async fn minted_count() {
        let provider = StaticProvider::default().with("getMintedCount", vec![vec![0x01, 0x00]]);
        let launchpad = launchpad(provider);
        assert_eq!(launchpad.get_minted_count("public").await.unwrap(), 256);
        assert_eq!(launchpad.provider.calls()[0].args, vec![b"public".to_vec()]);
    }
}
