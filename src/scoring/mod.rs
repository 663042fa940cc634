//! Deterministic pairwise compatibility scoring.
//!
//! Two hard filters run first; failing either disqualifies the pair. Otherwise
//! six category scores are summed:
//!
//! - availability: up to 15
//! - personality: up to 20
//! - communication: up to 10
//! - motivation: up to 20
//! - roles: up to 25
//! - conflict style: up to 10
//!
//! Every rule is order-independent, so `score(a, b)` and `score(b, a)` agree on
//! disqualification and on every number.

mod categories;
mod filters;
mod quality;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::CanonicalProfile;

pub use quality::MatchQuality;

/// Highest total a pair can reach.
pub const MAX_SCORE: u32 = 100;

/// One of the six scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Availability,
    Personality,
    Communication,
    Motivation,
    Roles,
    ConflictStyle,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Availability,
        Self::Personality,
        Self::Communication,
        Self::Motivation,
        Self::Roles,
        Self::ConflictStyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Availability => "availability",
            Self::Personality => "personality",
            Self::Communication => "communication",
            Self::Motivation => "motivation",
            Self::Roles => "roles",
            Self::ConflictStyle => "conflictStyle",
        }
    }

    /// Maximum score this category can contribute.
    pub fn max(&self) -> u32 {
        match self {
            Self::Availability => 15,
            Self::Personality => 20,
            Self::Communication => 10,
            Self::Motivation => 20,
            Self::Roles => 25,
            Self::ConflictStyle => 10,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category breakdown of a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub availability: u32,
    pub personality: u32,
    pub communication: u32,
    pub motivation: u32,
    pub roles: u32,
    pub conflict_style: u32,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Availability => self.availability,
            Category::Personality => self.personality,
            Category::Communication => self.communication,
            Category::Motivation => self.motivation,
            Category::Roles => self.roles,
            Category::ConflictStyle => self.conflict_style,
        }
    }

    pub fn total(&self) -> u32 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Categories with their scores, in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Outcome of scoring one pair.
///
/// When `disqualified` is set, `reasons` is non-empty and the scores are zero.
/// Otherwise `score` equals the sum of `category_scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub disqualified: bool,
    pub reasons: Vec<String>,
    pub score: u32,
    pub category_scores: CategoryScores,
}

impl MatchResult {
    fn disqualified(reason: String) -> Self {
        Self {
            disqualified: true,
            reasons: vec![reason],
            score: 0,
            category_scores: CategoryScores::default(),
        }
    }

    fn scored(category_scores: CategoryScores) -> Self {
        Self {
            disqualified: false,
            reasons: Vec::new(),
            score: category_scores.total(),
            category_scores,
        }
    }

    /// Quality tier, or `None` for a disqualified pair.
    pub fn quality(&self) -> Option<MatchQuality> {
        (!self.disqualified).then(|| MatchQuality::from_score(self.score))
    }
}

/// Score a pair of profiles.
pub fn score(a: &CanonicalProfile, b: &CanonicalProfile) -> MatchResult {
    if let Some(reason) = filters::availability_mismatch(a, b) {
        tracing::debug!(a = %a.id, b = %b.id, %reason, "Pair disqualified");
        return MatchResult::disqualified(reason);
    }
    if let Some(reason) = filters::communication_mismatch(a, b) {
        tracing::debug!(a = %a.id, b = %b.id, %reason, "Pair disqualified");
        return MatchResult::disqualified(reason);
    }

    let result = MatchResult::scored(CategoryScores {
        availability: categories::availability(a, b),
        personality: categories::personality(a, b),
        communication: categories::communication(a, b),
        motivation: categories::motivation(a, b),
        roles: categories::roles(a, b),
        conflict_style: categories::conflict_style(a, b),
    });
    tracing::debug!(a = %a.id, b = %b.id, score = result.score, "Pair scored");
    result
}

/// True when the unordered pair `(x, y)` appears in `table`.
fn unordered_pair_in<T: PartialEq>(table: &[(T, T)], x: &T, y: &T) -> bool {
    table
        .iter()
        .any(|(p, q)| (p == x && q == y) || (p == y && q == x))
}
