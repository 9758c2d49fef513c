//! Command line interface.
//!
//! Both commands replay a GeoJSON drawing feature by feature through a fresh
//! `FeatureStore`, so every feature is subject to the same limits and overlap
//! rules as an interactive drawing session.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use areadraw_core::constants::DEFAULT_EXPORT_FILE_NAME;
use areadraw_core::Config;
use areadraw_store::{FeatureStore, Placement, StoreError, StoreResult};

#[derive(Debug, Parser)]
#[command(name = "areadraw", version, about = "Collision-free map shape drawing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a drawing and export the resulting feature collection.
    Replay(ReplayArgs),
    /// Replay a drawing without writing anything.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// GeoJSON FeatureCollection to replay.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Where to write the resulting collection.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_EXPORT_FILE_NAME)]
    pub output: PathBuf,
    /// JSON or TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// GeoJSON FeatureCollection to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// JSON or TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Outcome counts of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub accepted: usize,
    pub trimmed: usize,
    pub rejected: usize,
    pub over_limit: usize,
}

impl ReplaySummary {
    pub fn total(&self) -> usize {
        self.accepted + self.trimmed + self.rejected + self.over_limit
    }

    pub fn stored(&self) -> usize {
        self.accepted + self.trimmed
    }

    fn record(&mut self, index: usize, result: &StoreResult<Placement>) {
        match result {
            Ok(Placement::Accepted) => self.accepted += 1,
            Ok(Placement::Trimmed) => self.trimmed += 1,
            Err(err @ StoreError::LimitReached { .. }) => {
                warn!("Feature #{}: {}", index, err);
                self.over_limit += 1;
            }
            Err(err) => {
                warn!("Feature #{}: {}", index, err);
                self.rejected += 1;
            }
        }
    }
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} feature(s): {} accepted, {} trimmed, {} rejected, {} over limit",
            self.total(),
            self.accepted,
            self.trimmed,
            self.rejected,
            self.over_limit
        )
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Submits every feature of `input` to a new store built from `config`.
pub fn replay(input: &Path, config: &Config) -> Result<(FeatureStore, ReplaySummary)> {
    let mut store = FeatureStore::new(config);
    let results = store
        .import_geojson(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut summary = ReplaySummary::default();
    for (index, result) in results.iter().enumerate() {
        summary.record(index, result);
    }
    info!("Replayed {}: {}", input.display(), summary);
    Ok((store, summary))
}

pub fn run(cli: Cli) -> Result<ReplaySummary> {
    match cli.command {
        Command::Replay(args) => {
            let config = load_config(args.config.as_deref())?;
            let (store, summary) = replay(&args.input, &config)?;
            store
                .export_geojson(&args.output)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            Ok(summary)
        }
        Command::Check(args) => {
            let config = load_config(args.config.as_deref())?;
            let (_, summary) = replay(&args.input, &config)?;
            Ok(summary)
        }
    }
}
