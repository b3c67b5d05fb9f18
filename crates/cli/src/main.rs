mod config;
mod load;

use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use recur_scan_core::{group_by_user, TransactionId, UserId};
use recur_scan_features::{FeatureExtractor, FeatureMap, RecurringVendors};

use config::ScanConfig;

/// Compute recurrence features for every transaction in a CSV export.
///
/// Each user's transactions are scored against that user's history only.
/// Output is one JSON object per line on stdout.
#[derive(Debug, Parser)]
#[command(name = "recur-scan", version)]
struct Args {
    /// CSV file to read, or `-` for stdin.
    #[arg(long, short)]
    input: PathBuf,

    /// TOML file describing the input layout and extra recurring vendors.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only emit rows for this user.
    #[arg(long)]
    user: Option<String>,
}

#[derive(Serialize)]
struct FeatureRow<'a> {
    id: &'a TransactionId,
    user_id: &'a UserId,
    features: &'a FeatureMap,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    let transactions = if args.input.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        load::load_transactions(buf.as_slice(), &config)?
    } else {
        let file = std::fs::File::open(&args.input)
            .with_context(|| format!("Failed to open {}", args.input.display()))?;
        load::load_transactions(file, &config)
            .with_context(|| format!("Failed to load {}", args.input.display()))?
    };

    let extractor =
        FeatureExtractor::with_vendors(RecurringVendors::with_vendors(&config.recurring_vendors));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (user_id, history) in group_by_user(&transactions) {
        if args.user.as_deref().is_some_and(|u| u != user_id.0) {
            continue;
        }
        tracing::info!(user = %user_id, transactions = history.len(), "scoring user");
        for (id, features) in extractor.compute_all(&history) {
            let row = FeatureRow {
                id: &id,
                user_id: &user_id,
                features: &features,
            };
            serde_json::to_writer(&mut out, &row)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(())
}
