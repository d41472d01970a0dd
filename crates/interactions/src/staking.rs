// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT staking contract interaction

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
    records::{TokenDecimals, TokenPayment},
    transaction::{Operation, Payment, TokenTransfer, TransactionDraft, TxContext},
    types::TypedValue,
};

/// Builds staking transactions and reads pending rewards
#[derive(Debug, Clone)]
pub struct StakingInteraction<P = GatewayProvider> {
    contract: SmartContract,
    provider: P,
    decimals: TokenDecimals,
}

impl StakingInteraction<GatewayProvider> {
    /// Interaction with the configured staking contract
    pub async fn load(
        config: &ClientConfig,
        cache: &AbiCache,
        loader: &AbiLoader,
    ) -> InteractionResult<Self> {
        let address = Address::from_bech32(&config.contract_addresses.staking)?;
        let abi = cache.get_or_load(ContractCategory::Staking, loader).await?;
        Ok(Self::new(
            SmartContract::new(address, abi, config.chain),
            GatewayProvider::new(config)?,
        ))
    }
}

fn ensure_nfts(nfts: &[TokenTransfer]) -> InteractionResult<()> {
    if nfts.is_empty() {
        return Err(InteractionError::validation("no NFTs given"));
    }
    if let Some(fungible) = nfts.iter().find(|n| n.nonce == 0) {
        return Err(InteractionError::validation(format!(
            "{} is not an NFT or SFT",
            fungible.token_identifier
        )));
    }
    Ok(())
}

impl<P: QueryProvider> StakingInteraction<P> {
    #[allow(missing_docs)]
    pub fn new(contract: SmartContract, provider: P) -> Self {
        Self {
            contract,
            provider,
            decimals: TokenDecimals::default(),
        }
    }

    /// Replace the decimals table used for reward amounts
    pub fn with_decimals(mut self, decimals: TokenDecimals) -> Self {
        self.decimals = decimals;
        self
    }

    /// Stake `nfts` into `pool_id`
    pub fn stake(
        &self,
        ctx: &TxContext,
        pool_id: u64,
        nfts: &[TokenTransfer],
    ) -> InteractionResult<TransactionDraft> {
        ensure_nfts(nfts)?;
        debug!(pool_id, count = nfts.len(), "Building stake transaction");
        Ok(self
            .contract
            .call(
                "stake",
                &[TypedValue::U64(pool_id)],
                Payment::from_transfers(nfts.to_vec()),
                Operation::Stake.gas_limit(nfts.len()),
            )?
            .build(ctx))
    }

    /// Start unstaking `nfts` from `pool_id`
    pub fn unstake(
        &self,
        ctx: &TxContext,
        pool_id: u64,
        nfts: &[TokenTransfer],
    ) -> InteractionResult<TransactionDraft> {
        ensure_nfts(nfts)?;
        let items = nfts
            .iter()
            .map(|n| {
                TypedValue::Multi(vec![
                    TypedValue::token(&n.token_identifier),
                    TypedValue::U64(n.nonce),
                    TypedValue::BigUint(n.amount),
                ])
            })
            .collect();
        Ok(self
            .contract
            .call(
                "unstake",
                &[TypedValue::U64(pool_id), TypedValue::Variadic(items)],
                Payment::None,
                Operation::Unstake.gas_limit(nfts.len()),
            )?
            .build(ctx))
    }

    /// Claim rewards from every pool in `pool_ids`
    pub fn claim_rewards(
        &self,
        ctx: &TxContext,
        pool_ids: &[u64],
    ) -> InteractionResult<TransactionDraft> {
        if pool_ids.is_empty() {
            return Err(InteractionError::validation("no pools given"));
        }
        let pools = pool_ids.iter().copied().map(TypedValue::U64).collect();
        Ok(self
            .contract
            .call(
                "claimRewards",
                &[TypedValue::Variadic(pools)],
                Payment::None,
                Operation::ClaimRewards.gas_limit(1),
            )?
            .build(ctx))
    }

    /// Withdraw NFTs whose unbonding period has passed
    pub fn claim_unstaked(
        &self,
        ctx: &TxContext,
        pool_id: u64,
    ) -> InteractionResult<TransactionDraft> {
        Ok(self
            .contract
            .call(
                "claimUnstaked",
                &[TypedValue::U64(pool_id)],
                Payment::None,
                Operation::ClaimUnstaked.gas_limit(1),
            )?
            .build(ctx))
    }

    /// Pending rewards of `user` in `pool_id`
    pub async fn get_user_rewards(
        &self,
        user: Address,
        pool_id: u64,
    ) -> InteractionResult<Vec<TokenPayment>> {
        self.contract
            .query_single(
                &self.provider,
                "getUserRewards",
                &[TypedValue::Address(user), TypedValue::U64(pool_id)],
            )
            .await?
            .as_list()?
            .iter()
            .map(|reward| TokenPayment::from_value(reward, &self.decimals))
            .collect()
    }
}
