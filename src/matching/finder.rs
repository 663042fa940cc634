use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::profile::{CanonicalProfile, ProfileSummary};
use crate::scoring::{MatchQuality, MatchResult, score};

/// A candidate ranked against a target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub candidate_id: String,
    pub result: MatchResult,
    pub quality: MatchQuality,
    pub candidate: ProfileSummary,
}

/// Two profiles that are each other's best match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualMatch {
    pub a: String,
    pub b: String,
    pub a_to_b: u32,
    pub b_to_a: u32,
    pub combined: u32,
    pub quality: MatchQuality,
}

/// Rank every other pool member against `target_id`.
///
/// Disqualified candidates are dropped. Results are ordered by score
/// descending; equal scores keep pool order. At most `limit` are returned.
pub fn find_matches(
    target_id: &str,
    pool: &[CanonicalProfile],
    limit: usize,
) -> Result<Vec<RankedMatch>, MatchError> {
    let target = pool
        .iter()
        .find(|p| p.id == target_id)
        .ok_or_else(|| MatchError::TargetNotFound {
            id: target_id.to_string(),
        })?;

    let mut ranked: Vec<RankedMatch> = pool
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .filter_map(|candidate| {
            let result = score(target, candidate);
            if result.disqualified {
                return None;
            }
            Some(RankedMatch {
                candidate_id: candidate.id.clone(),
                quality: MatchQuality::from_score(result.score),
                result,
                candidate: ProfileSummary::from(candidate),
            })
        })
        .collect();

    // Stable, so ties stay in pool order
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked.truncate(limit);

    tracing::debug!(target = %target_id, matches = ranked.len(), "Ranked candidates");
    Ok(ranked)
}

/// The single best candidate for `target_id`, if any qualifies.
pub fn best_match(
    target_id: &str,
    pool: &[CanonicalProfile],
) -> Result<Option<RankedMatch>, MatchError> {
    Ok(find_matches(target_id, pool, 1)?.into_iter().next())
}

/// Pairs of profiles that pick each other as best match.
///
/// Sorted by combined score descending, ties in pool order of the first member.
pub fn mutual_best_matches(pool: &[CanonicalProfile]) -> Vec<MutualMatch> {
    let best: Vec<Option<(String, u32)>> = pool
        .iter()
        .map(|profile| {
            best_match(&profile.id, pool)
                .ok()
                .flatten()
                .map(|m| (m.candidate_id, m.result.score))
        })
        .collect();

    let mut mutual = Vec::new();
    for (i, profile) in pool.iter().enumerate() {
        let Some((partner_id, a_to_b)) = &best[i] else {
            continue;
        };
        let Some(j) = pool.iter().position(|p| &p.id == partner_id) else {
            continue;
        };
        // Emit each pair once, from its earlier member
        if j <= i {
            continue;
        }
        if let Some((back_id, b_to_a)) = &best[j]
            && back_id == &profile.id
        {
            let combined = a_to_b + b_to_a;
            mutual.push(MutualMatch {
                a: profile.id.clone(),
                b: partner_id.clone(),
                a_to_b: *a_to_b,
                b_to_a: *b_to_a,
                combined,
                quality: MatchQuality::from_score(combined / 2),
            });
        }
    }

    mutual.sort_by(|x, y| y.combined.cmp(&x.combined));
    mutual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Availability, Communication};

    fn profile(id: &str) -> CanonicalProfile {
        CanonicalProfile::new(id)
    }

    fn with_roles(id: &str, roles: &[&str]) -> CanonicalProfile {
        let mut p = profile(id);
        p.roles = roles.iter().map(|r| r.to_string()).collect();
        p
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let pool = vec![profile("a"), profile("b")];
        assert_eq!(
            find_matches("zed", &pool, 5),
            Err(MatchError::TargetNotFound { id: "zed".into() })
        );
    }

    #[test]
    fn test_excludes_self_and_disqualified() {
        let mut a = profile("a");
        a.communication = Communication::DailyCheckin;
        let mut b = profile("b");
        b.communication = Communication::Async;
        let c = profile("c");
        let pool = vec![a, b, c];

        let ranked = find_matches("a", &pool, 10).unwrap();
        let ids: Vec<_> = ranked.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_sorted_descending_with_pool_order_ties() {
        let pool = vec![
            with_roles("t", &["technical"]),
            profile("x"),
            with_roles("s", &["sales"]),
            profile("y"),
        ];
        let ranked = find_matches("t", &pool, 10).unwrap();
        let ids: Vec<_> = ranked.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["s", "x", "y"]);
        assert!(ranked[0].result.score > ranked[1].result.score);
        assert_eq!(ranked[1].result.score, ranked[2].result.score);
    }

    #[test]
    fn test_limit_truncates() {
        let pool: Vec<_> = (0..8).map(|i| profile(&format!("p{i}"))).collect();
        assert_eq!(find_matches("p0", &pool, 3).unwrap().len(), 3);
        assert!(find_matches("p0", &pool, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_member_pool_has_no_matches() {
        let pool = vec![profile("solo")];
        assert!(find_matches("solo", &pool, 5).unwrap().is_empty());
        assert_eq!(best_match("solo", &pool).unwrap(), None);
    }

    #[test]
    fn test_mutual_best_matches() {
        let pool = vec![
            with_roles("tech", &["technical"]),
            with_roles("vis", &["visionary"]),
            with_roles("sales", &["sales"]),
            with_roles("op", &["operator"]),
        ];
        let mutual = mutual_best_matches(&pool);
        let pairs: Vec<_> = mutual.iter().map(|m| (m.a.as_str(), m.b.as_str())).collect();
        assert_eq!(pairs, vec![("tech", "sales"), ("vis", "op")]);
        assert_eq!(mutual[0].a_to_b, mutual[0].b_to_a);
        assert_eq!(mutual[0].combined, mutual[0].a_to_b * 2);
    }

    #[test]
    fn test_mutual_best_skips_isolated_profiles() {
        let mut lone = profile("lone");
        lone.availability = Availability::NightsWeekends;
        let mut other = profile("other");
        other.availability = Availability::TenToTwenty;
        assert!(mutual_best_matches(&[lone, other]).is_empty());
    }
}
