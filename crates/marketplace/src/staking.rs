// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Staking pools and user positions

use api_client::{ApiClient, ApiResult};
use shared_types::CollectionTicker;
use tracing::instrument;

use crate::{
    types::{StakingCollection, StakingPool, UserPoolStakingInfo},
    validate_address,
};

/// Staking operations
#[derive(Debug, Clone)]
pub struct StakingModule {
    client: ApiClient,
}

impl StakingModule {
    /// Create the module over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Pools that accept NFTs of `ticker`
    #[instrument(skip(self))]
    pub async fn get_collection_staking_pools(&self, ticker: &str) -> ApiResult<Vec<StakingPool>> {
        let ticker = CollectionTicker::new(ticker)?;
        self.client
            .get(&format!("/collection/{ticker}/staking/explore"))
            .await
    }

    /// Details of one pool
    #[instrument(skip(self))]
    pub async fn get_pool_details(&self, pool_id: u64) -> ApiResult<StakingPool> {
        self.client.get(&format!("/pool/{pool_id}/profile")).await
    }

    /// Position of `address` in pool `pool_id`
    #[instrument(skip(self))]
    pub async fn get_user_pool_staking_info(
        &self,
        address: &str,
        pool_id: u64,
    ) -> ApiResult<UserPoolStakingInfo> {
        validate_address(address)?;
        self.client
            .get(&format!("/user/{address}/staking/pool/{pool_id}"))
            .await
    }

    /// Collections offering staking
    #[instrument(skip(self))]
    pub async fn get_staking_explore(&self) -> ApiResult<Vec<StakingCollection>> {
        self.client.get("/collection/staking/explore").await
    }
}
