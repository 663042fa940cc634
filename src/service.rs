//! Store-backed entry points for the matching core.
//!
//! Every call reads a fresh pool snapshot from the store and normalizes it.
//! Pairing results are cached per snapshot fingerprint, so repeated requests
//! over an unchanged pool skip the quadratic scoring pass.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::MatchingConfig;
use crate::error::{MatchError, StoreError};
use crate::matching::{
    MutualMatch, PairingResult, PairingStrategy, RankedMatch, Stats, find_matches,
    mutual_best_matches, pair_all, pair_with,
};
use crate::profile::{
    CanonicalProfile, RawAnswers, RawProfileRecord, normalize, normalize_record,
};
use crate::scoring::{MatchResult, score};
use crate::store::ProfileStore;

pub struct MatchService {
    store: Arc<dyn ProfileStore>,
    config: MatchingConfig,
    cache: Option<Mutex<LruCache<blake3::Hash, PairingResult>>>,
}

impl MatchService {
    pub fn new(store: Arc<dyn ProfileStore>, config: MatchingConfig) -> Self {
        let cache = NonZeroUsize::new(config.cache_capacity)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));
        Self {
            store,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Read and normalize every stored profile.
    ///
    /// A failed read degrades to an empty pool.
    pub async fn load_pool(&self) -> Vec<CanonicalProfile> {
        match self.store.list_profiles().await {
            Ok(records) => records.iter().map(normalize_record).collect(),
            Err(e) => {
                tracing::warn!("Failed to load profiles, continuing with an empty pool: {}", e);
                Vec::new()
            }
        }
    }

    /// Normalize onboarding answers and persist the result.
    ///
    /// A fresh id is generated when `id` is `None`.
    pub async fn onboard(
        &self,
        id: Option<&str>,
        answers: &RawAnswers,
    ) -> Result<CanonicalProfile, StoreError> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let profile = normalize(&id, answers);

        let answer_text = |key: &str| {
            answers
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };
        let mut record = RawProfileRecord::from_profile(&profile);
        record.name = answer_text("name");
        record.email = answer_text("email");

        let stored = self.store.upsert_profile(record).await?;
        tracing::info!(id = %stored.id, "Profile onboarded");
        Ok(normalize_record(&stored))
    }

    /// Ranked candidates for `id`. `None` uses the configured limit.
    pub async fn matches_for(
        &self,
        id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RankedMatch>, MatchError> {
        let pool = self.load_pool().await;
        find_matches(id, &pool, limit.unwrap_or(self.config.default_limit))
    }

    /// Score two stored profiles against each other.
    pub async fn score_pair(&self, a: &str, b: &str) -> Result<MatchResult, MatchError> {
        let pool = self.load_pool().await;
        let lookup = |id: &str| {
            pool.iter()
                .find(|p| p.id == id)
                .ok_or_else(|| MatchError::TargetNotFound { id: id.to_string() })
        };
        Ok(score(lookup(a)?, lookup(b)?))
    }

    /// Pair the whole pool with the configured strategy.
    pub async fn pairings(&self) -> Result<PairingResult, MatchError> {
        self.pairings_with(self.config.strategy).await
    }

    pub async fn pairings_with(
        &self,
        strategy: PairingStrategy,
    ) -> Result<PairingResult, MatchError> {
        let pool = self.load_pool().await;
        self.cached_pairing(&pool, strategy).await
    }

    pub async fn mutual_best_matches(&self) -> Vec<MutualMatch> {
        let pool = self.load_pool().await;
        mutual_best_matches(&pool)
    }

    /// Pool statistics as of `now`.
    ///
    /// When the exact solver rejects the pool as too large, the average falls
    /// back to the greedy pairing.
    pub async fn stats(&self, now: DateTime<Utc>) -> Stats {
        let pool = self.load_pool().await;
        let pairing = if pool.len() < 2 {
            None
        } else {
            match self.cached_pairing(&pool, self.config.strategy).await {
                Ok(result) => Some(result),
                Err(e @ MatchError::PoolTooLargeForExact { .. }) => {
                    tracing::warn!("{}, using greedy pairing for stats", e);
                    pair_all(&pool).ok()
                }
                Err(_) => None,
            }
        };
        Stats::from_pairing(&pool, pairing.as_ref(), now, self.config.active_window_days)
    }

    async fn cached_pairing(
        &self,
        pool: &[CanonicalProfile],
        strategy: PairingStrategy,
    ) -> Result<PairingResult, MatchError> {
        let key = match &self.cache {
            Some(_) => fingerprint(pool, strategy, self.config.exact_max_pool),
            None => None,
        };

        if let (Some(cache), Some(key)) = (&self.cache, key.as_ref())
            && let Some(hit) = cache.lock().await.get(key)
        {
            tracing::debug!(%strategy, pool = pool.len(), "Pairing cache hit");
            return Ok(hit.clone());
        }

        let result = pair_with(strategy, pool, self.config.exact_max_pool)?;

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.lock().await.put(key, result.clone());
        }
        Ok(result)
    }
}

/// Content hash of a pool snapshot plus the pairing parameters.
fn fingerprint(
    pool: &[CanonicalProfile],
    strategy: PairingStrategy,
    exact_max_pool: usize,
) -> Option<blake3::Hash> {
    let snapshot = serde_json::to_vec(pool).ok()?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(strategy.as_str().as_bytes());
    hasher.update(&exact_max_pool.to_le_bytes());
    hasher.update(&snapshot);
    Some(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::Duration;
    use serde_json::json;

    struct BrokenStore;

    #[async_trait]
    impl ProfileStore for BrokenStore {
        async fn list_profiles(&self) -> Result<Vec<RawProfileRecord>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
        async fn get_profile(&self, id: &str) -> Result<RawProfileRecord, StoreError> {
            Err(StoreError::NotFound { id: id.to_string() })
        }
        async fn upsert_profile(
            &self,
            _record: RawProfileRecord,
        ) -> Result<RawProfileRecord, StoreError> {
            Err(StoreError::Backend("read only".into()))
        }
        async fn delete_profile(&self, _id: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("read only".into()))
        }
    }

    fn seeded() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_records(vec![
            RawProfileRecord::new("t")
                .with_field("roles", json!(["Technical"]))
                .with_field("availability", "full_time"),
            RawProfileRecord::new("s")
                .with_field("roles", json!(["Sales"]))
                .with_field("availability", "full_time"),
            RawProfileRecord::new("x"),
        ]))
    }

    #[tokio::test]
    async fn test_failed_read_degrades_to_empty_pool() {
        let service = MatchService::new(Arc::new(BrokenStore), MatchingConfig::default());
        assert!(service.load_pool().await.is_empty());
        assert_eq!(
            service.pairings().await,
            Err(MatchError::PoolTooSmall { size: 0 })
        );
        assert_eq!(
            service.matches_for("t", None).await,
            Err(MatchError::TargetNotFound { id: "t".into() })
        );
        assert_eq!(service.stats(Utc::now()).await.total_count, 0);
    }

    #[tokio::test]
    async fn test_onboard_then_match() {
        let store = seeded();
        let service = MatchService::new(store.clone(), MatchingConfig::default());

        let answers = RawAnswers::new()
            .with("email", "nia@example.com")
            .with("roles", json!(["Visionary"]))
            .with("availability", "Full-time");
        let profile = service.onboard(Some("nia"), &answers).await.unwrap();
        assert_eq!(profile.display_name, "nia");
        assert!(profile.updated_at.is_some());

        let stored = store.get_profile("nia").await.unwrap();
        assert_eq!(stored.email.as_deref(), Some("nia@example.com"));
        assert_eq!(stored.fields["availability"], "full_time");

        let matches = service.matches_for("t", Some(1)).await.unwrap();
        assert_eq!(matches[0].candidate_id, "s");
    }

    #[tokio::test]
    async fn test_onboard_generates_id() {
        let service = MatchService::new(Arc::new(MemoryStore::new()), MatchingConfig::default());
        let profile = service.onboard(None, &RawAnswers::new()).await.unwrap();
        assert!(Uuid::parse_str(&profile.id).is_ok());
    }

    #[tokio::test]
    async fn test_score_pair_unknown_id() {
        let service = MatchService::new(seeded(), MatchingConfig::default());
        assert!(service.score_pair("t", "s").await.is_ok());
        assert_eq!(
            service.score_pair("t", "ghost").await,
            Err(MatchError::TargetNotFound { id: "ghost".into() })
        );
    }

    #[tokio::test]
    async fn test_cache_returns_identical_results() {
        let store = seeded();
        let service = MatchService::new(store.clone(), MatchingConfig::default());
        let first = service.pairings().await.unwrap();
        let second = service.pairings().await.unwrap();
        assert_eq!(first, second);

        // A changed pool produces a new snapshot
        store.upsert_profile(RawProfileRecord::new("y")).await.unwrap();
        let third = service.pairings().await.unwrap();
        assert_eq!(third.pairs.len(), 2);
        assert!(third.unmatched.is_empty());
    }

    #[tokio::test]
    async fn test_uncached_matches_cached() {
        let cached = MatchService::new(seeded(), MatchingConfig::default());
        let uncached = MatchService::new(
            seeded(),
            MatchingConfig {
                cache_capacity: 0,
                ..MatchingConfig::default()
            },
        );
        for strategy in [PairingStrategy::Greedy, PairingStrategy::Exact] {
            assert_eq!(
                cached.pairings_with(strategy).await,
                uncached.pairings_with(strategy).await
            );
        }
    }

    #[tokio::test]
    async fn test_stats_fall_back_to_greedy_for_large_exact_pools() {
        let records = (0..5).map(|i| RawProfileRecord::new(format!("p{i}"))).collect();
        let service = MatchService::new(
            Arc::new(MemoryStore::with_records(records)),
            MatchingConfig {
                strategy: PairingStrategy::Exact,
                exact_max_pool: 4,
                ..MatchingConfig::default()
            },
        );
        let stats = service.stats(Utc::now() + Duration::days(1)).await;
        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.average_pairing_score, 45);
    }
}
