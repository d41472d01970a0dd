// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token prices, accepted payment tokens, search and analytics

use std::collections::HashMap;

use api_client::{ApiClient, ApiError, ApiResult, FetchOptions, Paginated, encode_json};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::instrument;

use crate::{
    filters::GlobalSearchArgs,
    types::{GlobalSearchResult, PaymentToken, VolumeBucket},
};

/// Token, search and analytics operations
#[derive(Debug, Clone)]
pub struct CommonModule {
    client: ApiClient,
}

impl CommonModule {
    /// Create the module over `client`
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// USD price of each token, keyed by identifier
    #[instrument(skip(self))]
    pub async fn get_tokens_usd_price(&self, tokens: &[&str]) -> ApiResult<HashMap<String, f64>> {
        if tokens.is_empty() {
            return Err(ApiError::validation("At least one token is required"));
        }
        if tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(ApiError::validation("Token identifiers cannot be empty"));
        }

        self.client
            .fetch_with_timeout(
                "/tokens/usd-price",
                FetchOptions::get().param("identifier", tokens.join(",")),
            )
            .await
    }

    /// Payment tokens accepted by the marketplace
    #[instrument(skip(self))]
    pub async fn get_accepted_payment_tokens(&self) -> ApiResult<Vec<PaymentToken>> {
        self.client.get("/tokens/xoxno/info").await
    }

    /// Search collections, users and creators by name
    #[instrument(skip(self, args), fields(search = %args.search))]
    pub async fn global_search(&self, args: &GlobalSearchArgs) -> ApiResult<GlobalSearchResult> {
        args.validate_paging()?;
        if args.search.trim().is_empty() {
            return Err(ApiError::validation("Search text cannot be empty"));
        }

        let filter = encode_json(&args.filter())?;
        self.client
            .fetch_with_timeout("/search", FetchOptions::get().param("filter", filter))
            .await
    }

    /// Marketplace volume between `start` and `end` in buckets of `bin` (e.g. `1d`)
    #[instrument(skip(self))]
    pub async fn get_analytics_volume(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        bin: &str,
    ) -> ApiResult<Vec<VolumeBucket>> {
        if start >= end {
            return Err(ApiError::validation("Start time must be before end time"));
        }
        if bin.trim().is_empty() {
            return Err(ApiError::validation("Bin cannot be empty"));
        }

        self.client
            .fetch_with_timeout(
                "/analytics/volume",
                FetchOptions::get()
                    .param("startTime", start.to_rfc3339_opts(SecondsFormat::Millis, true))
                    .param("endTime", end.to_rfc3339_opts(SecondsFormat::Millis, true))
                    .param("bin", bin),
            )
            .await
    }
}
