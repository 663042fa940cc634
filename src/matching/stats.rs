use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::pairing::{PairingResult, pair_all};
use crate::profile::CanonicalProfile;

/// Community-level metrics for a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_count: usize,
    /// Profiles updated inside the trailing activity window.
    pub recently_active_count: usize,
    /// Pairing average, rounded; 0 when fewer than two profiles.
    pub average_pairing_score: u32,
    /// `total_count / 2`, regardless of how many pairs actually form.
    pub approx_pair_count: usize,
}

impl Stats {
    /// Build stats from an already computed pairing of the same pool.
    pub fn from_pairing(
        pool: &[CanonicalProfile],
        pairing: Option<&PairingResult>,
        now: DateTime<Utc>,
        window_days: u32,
    ) -> Self {
        let cutoff = now - Duration::days(i64::from(window_days));
        let recently_active_count = pool
            .iter()
            .filter(|p| p.updated_at.is_some_and(|at| at > cutoff))
            .count();
        let average_pairing_score = pairing
            .map(|result| result.average_score.round() as u32)
            .unwrap_or(0);

        Self {
            total_count: pool.len(),
            recently_active_count,
            average_pairing_score,
            approx_pair_count: pool.len() / 2,
        }
    }
}

/// Compute pool statistics as of `now`.
pub fn compute_stats(pool: &[CanonicalProfile], now: DateTime<Utc>, window_days: u32) -> Stats {
    let pairing = if pool.len() >= 2 {
        pair_all(pool).ok()
    } else {
        None
    };
    Stats::from_pairing(pool, pairing.as_ref(), now, window_days)
}
