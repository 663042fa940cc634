//! Plain-text tables for the `table` output format.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::matching::{MutualMatch, PairingResult, RankedMatch, Stats};
use crate::scoring::{MAX_SCORE, MatchResult};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Truncate long ids so columns stay aligned.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let truncated: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

pub fn match_result_table(a: &str, b: &str, result: &MatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Compatibility: {a} x {b}");
    let _ = writeln!(out, "{}", rule());

    if result.disqualified {
        let _ = writeln!(out, "Disqualified");
        for reason in &result.reasons {
            let _ = writeln!(out, "  - {reason}");
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{:<16} {:>6} {:>6}  {}",
        "Category", "Score", "Max", "Description"
    );
    for (category, score) in result.category_scores.iter() {
        let _ = writeln!(
            out,
            "{:<16} {:>6} {:>6}  {}",
            category.as_str(),
            score,
            category.max(),
            category.describe(score)
        );
    }
    let _ = writeln!(out, "{}", rule());
    let quality = result
        .quality()
        .map(|q| q.to_string())
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{:<16} {:>6} {:>6}  {}",
        "Total", result.score, MAX_SCORE, quality
    );
    out
}

pub fn matches_table(target: &str, matches: &[RankedMatch]) -> String {
    let mut out = String::new();
    if matches.is_empty() {
        let _ = writeln!(out, "No compatible candidates for {target}.");
        return out;
    }

    let _ = writeln!(out, "Matches for {target} ({}):", matches.len());
    let _ = writeln!(
        out,
        "{:<4} {:<24} {:>6} {:<12} {}",
        "#", "Candidate", "Score", "Quality", "Roles"
    );
    let _ = writeln!(out, "{}", rule());
    for (rank, m) in matches.iter().enumerate() {
        let roles = if m.candidate.roles.is_empty() {
            "-".to_string()
        } else {
            m.candidate.roles.join(", ")
        };
        let _ = writeln!(
            out,
            "{:<4} {:<24} {:>6} {:<12} {}",
            rank + 1,
            clip(&m.candidate.name, 24),
            m.result.score,
            m.quality.as_str(),
            roles
        );
        let strongest = m
            .result
            .category_scores
            .iter()
            .max_by_key(|(category, score)| (score * 100) / category.max())
            .map(|(category, score)| category.describe(score))
            .unwrap_or("");
        let _ = writeln!(
            out,
            "{:<4} {} | {} | {}",
            "",
            m.candidate.persona.personality,
            m.candidate.persona.work_style,
            strongest
        );
    }
    out
}

pub fn pairing_table(result: &PairingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pairs: {} | Unmatched: {} | Total: {} | Average: {:.1}",
        result.pairs.len(),
        result.unmatched.len(),
        result.total_score,
        result.average_score
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<24} {:<24} {:>6} {:<12}",
        "Member", "Partner", "Score", "Quality"
    );
    let _ = writeln!(out, "{}", rule());
    for pair in &result.pairs {
        let _ = writeln!(
            out,
            "{:<24} {:<24} {:>6} {:<12}",
            clip(&pair.a, 24),
            clip(&pair.b, 24),
            pair.score,
            pair.quality.as_str()
        );
    }
    if !result.unmatched.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unmatched: {}", result.unmatched.join(", "));
    }
    out
}

pub fn mutual_table(matches: &[MutualMatch]) -> String {
    let mut out = String::new();
    if matches.is_empty() {
        let _ = writeln!(out, "No mutual best matches.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<24} {:<24} {:>8} {:<12}",
        "Member", "Partner", "Combined", "Quality"
    );
    let _ = writeln!(out, "{}", rule());
    for m in matches {
        let _ = writeln!(
            out,
            "{:<24} {:<24} {:>8} {:<12}",
            clip(&m.a, 24),
            clip(&m.b, 24),
            m.combined,
            m.quality.as_str()
        );
    }
    out
}

pub fn stats_table(stats: &Stats, window_days: u32) -> String {
    let mut out = String::new();
    let rows = [
        ("Profiles", stats.total_count.to_string()),
        (
            "Recently active",
            format!("{} ({window_days}d)", stats.recently_active_count),
        ),
        (
            "Average pairing score",
            stats.average_pairing_score.to_string(),
        ),
        ("Potential pairs", stats.approx_pair_count.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<30} {:>12}", label, value);
    }
    out
}

/// Description per category name, for the JSON output.
pub fn category_descriptions(result: &MatchResult) -> BTreeMap<&'static str, &'static str> {
    result
        .category_scores
        .iter()
        .map(|(category, score)| (category.as_str(), category.describe(score)))
        .collect()
}
