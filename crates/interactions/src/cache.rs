// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory ABI cache
//!
//! One parsed ABI per contract category. The cache is an explicit value that
//! callers share between interaction builders; nothing is global.

use std::sync::Arc;

use dashmap::DashMap;
use shared_types::ContractCategory;
use tracing::{debug, trace};

use crate::{
    abi::{Abi, AbiLoader},
    error::InteractionResult,
};

/// Cache hit/miss counters and current size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    #[allow(missing_docs)]
    pub hits: u64,
    #[allow(missing_docs)]
    pub misses: u64,
    /// Number of cached ABIs
    pub entries: usize,
}

/// ABI cache keyed by contract category
#[derive(Debug, Default)]
pub struct AbiCache {
    entries: DashMap<ContractCategory, Arc<Abi>>,
    stats: DashMap<&'static str, u64>,
}

impl AbiCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached ABI for `category`, if any
    pub fn get(&self, category: ContractCategory) -> Option<Arc<Abi>> {
        let found = self.entries.get(&category).map(|entry| Arc::clone(&entry));
        self.increment_stat(if found.is_some() { "hits" } else { "misses" });
        found
    }

    /// Cached ABI for `category`, fetching it with `loader` on a miss
    ///
    /// Concurrent misses may fetch twice; the first stored value is kept and
    /// returned to every caller.
    pub async fn get_or_load(
        &self,
        category: ContractCategory,
        loader: &AbiLoader,
    ) -> InteractionResult<Arc<Abi>> {
        if let Some(abi) = self.get(category) {
            trace!(%category, "ABI cache hit");
            return Ok(abi);
        }

        debug!(%category, "ABI cache miss");
        let abi = loader.fetch(category).await?;
        Ok(self.insert(category, abi))
    }

    /// Store `abi` unless one is already cached, returning the cached value
    pub fn insert(&self, category: ContractCategory, abi: Abi) -> Arc<Abi> {
        Arc::clone(&self.entries.entry(category).or_insert_with(|| Arc::new(abi)))
    }

    /// Drop the cached ABI for `category`
    pub fn invalidate(&self, category: ContractCategory) -> bool {
        self.entries.remove(&category).is_some()
    }

    /// Drop every cached ABI
    pub fn clear(&self) {
        self.entries.clear();
        debug!("ABI cache cleared");
    }

    /// Snapshot of the cache counters
    pub fn stats(&self) -> CacheStats {
        let stat = |name: &str| self.stats.get(name).map_or(0, |v| *v);
        CacheStats {
            hits: stat("hits"),
            misses: stat("misses"),
            entries: self.entries.len(),
        }
    }

    fn increment_stat(&self, name: &'static str) {
        *self.stats.entry(name).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::tests::{MARKET_ABI, STAKING_ABI};

    #[test]
    fn first_value_wins() {
        let cache = AbiCache::new();
        let market = Abi::from_json(MARKET_ABI).unwrap();
        let staking = Abi::from_json(STAKING_ABI).unwrap();

        let stored = cache.insert(ContractCategory::Market, market);
        let again = cache.insert(ContractCategory::Market, staking);
        assert!(Arc::ptr_eq(&stored, &again));
        assert_eq!(again.name, "XOXNOProtocol");
    }

    #[test]
    fn stats_and_invalidation() {
        let cache = AbiCache::new();
        assert!(cache.get(ContractCategory::Staking).is_none());

        cache.insert(
            ContractCategory::Staking,
            Abi::from_json(STAKING_ABI).unwrap(),
        );
        assert!(cache.get(ContractCategory::Staking).is_some());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );

        assert!(cache.invalidate(ContractCategory::Staking));
        assert!(!cache.invalidate(ContractCategory::Staking));

        cache.insert(ContractCategory::Market, Abi::default());
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
