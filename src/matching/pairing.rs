//! Cohort pairing.
//!
//! [`pair_all`] is the greedy heuristic: score every unordered pair, drop the
//! disqualified ones, sort by score and accept pairs whose members are both
//! still free. It is fast but not always optimal.
//!
//! [`pair_all_exact`] finds the maximum-total disjoint pairing with a dynamic
//! program over member subsets. It is exponential in the pool size, so the
//! pool is capped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::profile::CanonicalProfile;
use crate::scoring::{CategoryScores, MatchQuality, score};

/// Hard upper bound for the exact solver's pool size.
pub const EXACT_POOL_LIMIT: usize = 24;

/// Which pairing algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingStrategy {
    #[default]
    Greedy,
    Exact,
}

impl PairingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "exact" => Ok(Self::Exact),
            other => Err(format!("unknown pairing strategy '{other}', expected greedy or exact")),
        }
    }
}

/// One accepted pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub a: String,
    pub b: String,
    pub score: u32,
    pub category_scores: CategoryScores,
    pub quality: MatchQuality,
}

/// A disjoint pairing of a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingResult {
    pub pairs: Vec<Pair>,
    /// Members left without a partner, in pool order.
    pub unmatched: Vec<String>,
    pub total_score: u32,
    /// Mean pair score, 0 when no pair formed.
    pub average_score: f64,
}

impl PairingResult {
    fn from_pairs(pool: &[CanonicalProfile], pairs: Vec<Pair>) -> Self {
        let unmatched = pool
            .iter()
            .filter(|p| !pairs.iter().any(|pair| pair.a == p.id || pair.b == p.id))
            .map(|p| p.id.clone())
            .collect();
        let total_score: u32 = pairs.iter().map(|p| p.score).sum();
        let average_score = if pairs.is_empty() {
            0.0
        } else {
            f64::from(total_score) / pairs.len() as f64
        };
        Self {
            pairs,
            unmatched,
            total_score,
            average_score,
        }
    }
}

/// A scored, non-disqualified candidate pair by pool index.
struct Candidate {
    i: usize,
    j: usize,
    score: u32,
    category_scores: CategoryScores,
}

impl Candidate {
    fn into_pair(self, pool: &[CanonicalProfile]) -> Pair {
        Pair {
            a: pool[self.i].id.clone(),
            b: pool[self.j].id.clone(),
            score: self.score,
            category_scores: self.category_scores,
            quality: MatchQuality::from_score(self.score),
        }
    }
}

/// Every qualifying pair, enumerated `(i, j)` with `i < j` in pool order.
fn candidates(pool: &[CanonicalProfile]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let result = score(&pool[i], &pool[j]);
            if !result.disqualified {
                out.push(Candidate {
                    i,
                    j,
                    score: result.score,
                    category_scores: result.category_scores,
                });
            }
        }
    }
    out
}

fn ensure_pairable(pool: &[CanonicalProfile]) -> Result<(), MatchError> {
    if pool.len() < 2 {
        return Err(MatchError::PoolTooSmall { size: pool.len() });
    }
    Ok(())
}

/// Greedy pairing of the whole pool.
pub fn pair_all(pool: &[CanonicalProfile]) -> Result<PairingResult, MatchError> {
    ensure_pairable(pool)?;

    let mut candidates = candidates(pool);
    // Stable, so equal scores keep enumeration order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut used = vec![false; pool.len()];
    let mut pairs = Vec::new();
    for candidate in candidates {
        if used[candidate.i] || used[candidate.j] {
            continue;
        }
        used[candidate.i] = true;
        used[candidate.j] = true;
        pairs.push(candidate.into_pair(pool));
    }

    let result = PairingResult::from_pairs(pool, pairs);
    tracing::info!(
        pool = pool.len(),
        pairs = result.pairs.len(),
        unmatched = result.unmatched.len(),
        total = result.total_score,
        "Greedy pairing complete"
    );
    Ok(result)
}

/// Maximum-total pairing of the whole pool.
///
/// Rejects pools larger than `max_pool` (itself capped at
/// [`EXACT_POOL_LIMIT`]). Pairs come out ordered by score descending.
pub fn pair_all_exact(
    pool: &[CanonicalProfile],
    max_pool: usize,
) -> Result<PairingResult, MatchError> {
    ensure_pairable(pool)?;
    let max = max_pool.min(EXACT_POOL_LIMIT);
    let n = pool.len();
    if n > max {
        return Err(MatchError::PoolTooLargeForExact { size: n, max });
    }

    let mut weights: Vec<Vec<Option<Candidate>>> =
        (0..n).map(|_| (0..n).map(|_| None).collect()).collect();
    for candidate in candidates(pool) {
        let (i, j) = (candidate.i, candidate.j);
        weights[i][j] = Some(candidate);
    }

    // best[mask]: highest total achievable using only members in mask.
    // choice[mask]: partner of mask's lowest member, or NO_PARTNER.
    const NO_PARTNER: u8 = u8::MAX;
    let states = 1usize << n;
    let mut best = vec![0u32; states];
    let mut choice = vec![NO_PARTNER; states];

    for mask in 1..states {
        let i = mask.trailing_zeros() as usize;
        let rest = mask & !(1 << i);
        let mut top = best[rest];
        let mut partner = NO_PARTNER;
        for j in (i + 1)..n {
            if rest & (1 << j) == 0 {
                continue;
            }
            if let Some(candidate) = &weights[i][j] {
                let total = candidate.score + best[rest & !(1 << j)];
                if total > top {
                    top = total;
                    partner = j as u8;
                }
            }
        }
        best[mask] = top;
        choice[mask] = partner;
    }

    let mut pairs = Vec::new();
    let mut mask = states - 1;
    while mask != 0 {
        let i = mask.trailing_zeros() as usize;
        mask &= !(1 << i);
        if choice[mask | (1 << i)] == NO_PARTNER {
            continue;
        }
        let j = usize::from(choice[mask | (1 << i)]);
        mask &= !(1 << j);
        if let Some(candidate) = weights[i][j].take() {
            pairs.push(candidate.into_pair(pool));
        }
    }
    pairs.sort_by(|a, b| b.score.cmp(&a.score));

    let result = PairingResult::from_pairs(pool, pairs);
    tracing::info!(
        pool = n,
        pairs = result.pairs.len(),
        unmatched = result.unmatched.len(),
        total = result.total_score,
        "Exact pairing complete"
    );
    Ok(result)
}

/// Run the pairing selected by `strategy`.
pub fn pair_with(
    strategy: PairingStrategy,
    pool: &[CanonicalProfile],
    exact_max_pool: usize,
) -> Result<PairingResult, MatchError> {
    match strategy {
        PairingStrategy::Greedy => pair_all(pool),
        PairingStrategy::Exact => pair_all_exact(pool, exact_max_pool),
    }
}
