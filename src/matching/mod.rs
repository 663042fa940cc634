//! Pool-level operations built on the pairwise scorer.
//!
//! Everything here is a pure function over a borrowed pool snapshot. Pool
//! order is significant: it breaks every tie.

mod finder;
mod pairing;
mod stats;

pub use finder::{MutualMatch, RankedMatch, best_match, find_matches, mutual_best_matches};
pub use pairing::{
    EXACT_POOL_LIMIT, Pair, PairingResult, PairingStrategy, pair_all, pair_all_exact, pair_with,
};
pub use stats::{Stats, compute_stats};
