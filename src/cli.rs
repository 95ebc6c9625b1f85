use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "phish-checkr",
    about = "Score URLs for phishing risk from lexical and registration signals",
    version
)]
pub struct Cli {
    /// URLs to score
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Trained model file [default: model/phishing_model.json, or [model].path from config]
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Skip the registration-age lookup (domain_age_days scores as 0)
    #[arg(long)]
    pub offline: bool,

    /// Registration-lookup timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file [default: ./.phish-checkr/config.toml, fallback ~/.config/phish-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show feature details for every URL (not just flagged ones)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
