use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use upgrade_expiry_core::{sweep, ExpiryConfig, ExpiryPolicy, WriteMode};

mod render;
mod signal;

use render::{current_output_style, format_sweep_summary};
use signal::{append_github_output, format_set_output_line};

#[derive(Parser, Debug)]
#[command(name = "upgrade-expiry")]
#[command(
    about = "Comment out stale commands in automatic upgrade scripts",
    long_about = None
)]
struct Cli {
    #[arg(long, default_value = ".")]
    root: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,
    #[arg(long)]
    threshold_days: Option<i64>,
    #[arg(long)]
    dry_run: bool,
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    run_cli(cli)
}

fn run_cli(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.threshold_days)?;
    let today = cli.today.unwrap_or_else(|| Utc::now().date_naive());
    let policy = ExpiryPolicy::new(today).with_threshold_days(config.threshold_days);
    let mode = if cli.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Apply
    };

    info!(
        %today,
        threshold_days = policy.threshold_days,
        dry_run = cli.dry_run,
        "sweeping automatic upgrade scripts"
    );
    let report = sweep(&cli.root, &config, &policy, mode)?;
    let changed = report.changes_made();

    if !cli.quiet {
        for line in format_sweep_summary(&report, current_output_style()) {
            eprintln!("{line}");
        }
    }

    println!("{}", format_set_output_line(changed));
    if let Some(path) = cli.github_output.as_deref() {
        append_github_output(path, changed)?;
    }

    Ok(())
}

fn resolve_config(
    path: Option<&std::path::Path>,
    threshold_override: Option<i64>,
) -> Result<ExpiryConfig> {
    let mut config = match path {
        Some(path) => ExpiryConfig::load(path)?,
        None => ExpiryConfig::default(),
    };
    if let Some(threshold_days) = threshold_override {
        config.threshold_days = threshold_days;
        config.validate()?;
    }
    Ok(config)
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
