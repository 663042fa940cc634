//! Sprout: cofounder compatibility scoring and cohort pairing.
//!
//! Onboarding answers are normalized into a [`CanonicalProfile`]. The scorer
//! compares two profiles, the finder ranks candidates for one profile, and the
//! pairing engine splits a whole cohort into disjoint pairs. All of that is
//! pure; [`MatchService`] wires it to a [`ProfileStore`].

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod profile;
pub mod scoring;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, Error, MatchError, Result, StoreError};
pub use matching::{
    PairingResult, PairingStrategy, RankedMatch, Stats, compute_stats, find_matches, pair_all,
    pair_all_exact,
};
pub use profile::{CanonicalProfile, RawAnswers, RawProfileRecord, normalize, normalize_record};
pub use scoring::{MatchQuality, MatchResult, score};
pub use service::MatchService;
pub use store::{JsonFileStore, MemoryStore, ProfileStore};
