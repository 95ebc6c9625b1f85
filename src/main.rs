//! `phish-checkr` — extract URL signals, score phishing risk, report verdicts.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load lookup/model config ([`config::load_config`]).
//! 3. Load the trained classifier ([`classifier::forest::ForestModel`]).
//! 4. Score each URL through one shared [`scorer::Scorer`] (batched,
//!    lookup-bounded; `--offline` skips the registration lookup).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (all benign) or `1` (a phishing verdict or scoring fault).

mod classifier;
mod cli;
mod config;
mod features;
mod lookup;
mod models;
mod report;
mod scorer;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use classifier::forest::ForestModel;
use cli::{Cli, ReportFormat};
use config::load_config;
use lookup::DomainAgeResolver;
use models::{RiskLabel, UrlReport};
use scorer::{ScoreError, Scorer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let model_path = cli.model.unwrap_or_else(|| config.model.path.clone());
    let model = ForestModel::load(&model_path)?;

    let resolver = if cli.offline {
        None
    } else {
        let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.lookup.timeout_secs));
        Some(DomainAgeResolver::new(&config.lookup.endpoint, timeout)?)
    };

    let scorer = Scorer::new(Arc::new(model), resolver);

    if !cli.quiet {
        eprintln!("  {} scoring {} URL(s)", "→".cyan(), cli.urls.len());
    }

    let results = score_all(&scorer, &cli.urls, cli.quiet).await?;

    // Per-URL faults go to stderr; remaining URLs are still reported
    let mut reports: Vec<UrlReport> = Vec::with_capacity(results.len());
    let mut fault_count = 0usize;

    for (url, result) in cli.urls.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                fault_count += 1;
                eprintln!("  {} {}: {}", "✗".red(), url, e);
            }
        }
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&reports, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    let flagged = reports
        .iter()
        .any(|r| r.verdict.label == RiskLabel::Phishing);

    if flagged || fault_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Score URLs concurrently in bounded batches so a long input list cannot
/// flood the registry with parallel lookups. Requests share no mutable
/// state; order of completion does not affect results.
async fn score_all(
    scorer: &Scorer,
    urls: &[String],
    quiet: bool,
) -> Result<Vec<std::result::Result<UrlReport, ScoreError>>> {
    use futures::future::join_all;

    const BATCH_SIZE: usize = 16;

    let pb = if !quiet && urls.len() > 1 {
        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(urls.len());

    for batch in urls.chunks(BATCH_SIZE) {
        let futures: Vec<_> = batch.iter().map(|url| scorer.score(url)).collect();
        for result in join_all(futures).await {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            results.push(result);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(results)
}
