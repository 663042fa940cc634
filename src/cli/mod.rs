//! Command-line interface.
//!
//! Commands read profiles through the configured store and print either a
//! plain table or JSON to the given writer. Logs go to stderr.

mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::matching::PairingStrategy;
use crate::profile::{RawAnswers, normalize};
use crate::service::MatchService;

#[derive(Parser, Debug)]
#[command(
    name = "sprout",
    version,
    about = "Cofounder compatibility scoring and cohort pairing"
)]
pub struct Cli {
    /// Path to a TOML config file (overrides SPROUT_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profiles JSON file (overrides SPROUT_PROFILES_PATH).
    #[arg(long, global = true)]
    pub profiles: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Normalize a survey answers file and print the canonical profile.
    Normalize {
        /// JSON object of question id to answer.
        answers: PathBuf,

        /// Profile id (generated when omitted).
        #[arg(long)]
        id: Option<String>,

        /// Persist the profile through the store.
        #[arg(long)]
        save: bool,
    },

    /// Score two stored profiles against each other.
    Score {
        a: String,
        b: String,

        /// Output format.
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Rank candidates for a stored profile.
    Matches {
        id: String,

        /// Maximum candidates (defaults to SPROUT_MATCH_LIMIT).
        #[arg(long)]
        limit: Option<usize>,

        /// Output format.
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Pair the whole cohort.
    Pair {
        /// greedy or exact (defaults to SPROUT_PAIRING_STRATEGY).
        #[arg(long)]
        strategy: Option<PairingStrategy>,

        /// Output format.
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// List profiles that are each other's best match.
    Mutual {
        /// Output format.
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show cohort statistics.
    Stats {
        /// Output format.
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Run one command against `service`, writing the report to `out`.
pub async fn run_command<W: Write>(
    service: &MatchService,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Normalize { answers, id, save } => {
            let content = tokio::fs::read_to_string(&answers)
                .await
                .with_context(|| format!("reading answers from {}", answers.display()))?;
            let answers: RawAnswers = serde_json::from_str(&content)
                .with_context(|| format!("parsing answers in {}", answers.display()))?;
            let profile = if save {
                service.onboard(id.as_deref(), &answers).await?
            } else {
                let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
                normalize(&id, &answers)
            };
            write_json(out, &profile)
        }
        Command::Score { a, b, format } => {
            let result = service.score_pair(&a, &b).await?;
            match format {
                OutputFormat::Json => write_json(
                    out,
                    &serde_json::json!({
                        "a": a,
                        "b": b,
                        "result": result,
                        "quality": result.quality(),
                        "descriptions": report::category_descriptions(&result),
                    }),
                ),
                OutputFormat::Table => {
                    write!(out, "{}", report::match_result_table(&a, &b, &result))?;
                    Ok(())
                }
            }
        }
        Command::Matches { id, limit, format } => {
            let matches = service.matches_for(&id, limit).await?;
            match format {
                OutputFormat::Json => write_json(out, &matches),
                OutputFormat::Table => {
                    write!(out, "{}", report::matches_table(&id, &matches))?;
                    Ok(())
                }
            }
        }
        Command::Pair { strategy, format } => {
            let strategy = strategy.unwrap_or(service.config().strategy);
            let result = service.pairings_with(strategy).await?;
            match format {
                OutputFormat::Json => write_json(out, &result),
                OutputFormat::Table => {
                    writeln!(out, "Strategy: {strategy}")?;
                    write!(out, "{}", report::pairing_table(&result))?;
                    Ok(())
                }
            }
        }
        Command::Mutual { format } => {
            let mutual = service.mutual_best_matches().await;
            match format {
                OutputFormat::Json => write_json(out, &mutual),
                OutputFormat::Table => {
                    write!(out, "{}", report::mutual_table(&mutual))?;
                    Ok(())
                }
            }
        }
        Command::Stats { format } => {
            let stats = service.stats(Utc::now()).await;
            match format {
                OutputFormat::Json => write_json(out, &stats),
                OutputFormat::Table => {
                    let window = service.config().active_window_days;
                    write!(out, "{}", report::stats_table(&stats, window))?;
                    Ok(())
                }
            }
        }
    }
}
