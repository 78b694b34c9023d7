//! Command implementations for the pricedelta binary

use std::path::PathBuf;

use colored::Colorize;

use pricedelta::catalog::{Engine, SourceSpec};
use pricedelta::cli::SourceSide;
use pricedelta::config::Config;
use pricedelta::error::{PricedeltaError, Result};
use pricedelta::extract::{extract_catalog, ExtractReport, SkipReason};
use pricedelta::fetch;
use pricedelta::matching::{compare, PrefixWords};
use pricedelta::report::{report_filename, write_report};

/// Load config from an explicit path (must exist) or the default location
/// (falls back to built-in sources)
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(PricedeltaError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Config::load_from(&path)
        }
        None => Config::load(),
    }
}

/// Fetch one source and extract its catalog, printing progress and a
/// skipped-card summary
fn fetch_and_extract(spec: &SourceSpec) -> Result<ExtractReport> {
    println!("Fetching {} catalog from {}...", spec.name.bold(), spec.url);

    let content = fetch::fetch(&spec.url, &spec.engine, &spec.headers)?;
    let report = extract_catalog(&content, spec)?;

    println!("  {} products extracted", report.catalog.len());
    print_skip_summary(&report);

    Ok(report)
}

/// Summarize skipped cards on stderr so markup drift is visible without
/// failing the run
fn print_skip_summary(report: &ExtractReport) {
    if report.issues.is_empty() {
        return;
    }

    let count = |reason: SkipReason| {
        report
            .issues
            .iter()
            .filter(|issue| issue.reason == reason)
            .count()
    };

    let mut parts = Vec::new();
    for reason in [
        SkipReason::NoTitleElement,
        SkipReason::NoPriceElement,
        SkipReason::NoPriceDigits,
    ] {
        let n = count(reason.clone());
        if n > 0 {
            parts.push(format!("{} {}", n, reason));
        }
    }

    eprintln!(
        "  {} {} cards skipped: {}",
        "warning:".yellow(),
        report.issues.len(),
        parts.join(", ")
    );
}

/// Full pipeline: fetch ours, fetch competitor, match, write the dated report
pub fn cmd_run(config: Option<PathBuf>, out_dir: Option<PathBuf>, browser: bool) -> Result<()> {
    let mut config = load_config(config)?;

    if browser {
        let status = fetch::check_browser();
        if !status.is_ready() {
            return Err(PricedeltaError::BrowserError(
                status.install_instructions().to_string(),
            ));
        }
        config.ours.engine = Engine::Browser;
        config.competitor.engine = Engine::Browser;
    }

    let ours = fetch_and_extract(&config.ours)?;
    let competitor = fetch_and_extract(&config.competitor)?;

    println!("Comparing prices...");
    let rows = compare(&ours.catalog, &competitor.catalog, &PrefixWords::default());
    let matched = rows.iter().filter(|r| r.difference.is_some()).count();
    println!("  {} of {} products matched", matched, rows.len());

    let out_dir = out_dir
        .or(config.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let path = out_dir.join(report_filename(chrono::Local::now().date_naive()));
    write_report(&rows, &path)?;
    println!("{} Report saved to {}", "✓".green(), path.display());

    Ok(())
}

/// Fetch one source and print what the extractor sees
pub fn cmd_preview(source: SourceSide, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let spec = match source {
        SourceSide::Ours => &config.ours,
        SourceSide::Competitor => &config.competitor,
    };

    if json {
        let content = fetch::fetch(&spec.url, &spec.engine, &spec.headers)?;
        let report = extract_catalog(&content, spec)?;
        let output = serde_json::json!({
            "source": spec.name,
            "url": spec.url,
            "products": report.catalog.iter().collect::<Vec<_>>(),
            "skipped_cards": report.issues.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let report = fetch_and_extract(spec)?;
    println!();
    for entry in report.catalog.iter() {
        println!("  {:>10}  {}", entry.price, entry.title);
    }

    Ok(())
}

/// Write the default config for editing
pub fn cmd_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;

    if path.exists() && !force {
        return Err(PricedeltaError::ConfigError(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("{} Wrote starter config to {}", "✓".green(), path.display());
    println!("Edit the source URLs and class fragments, then run `pricedelta run`.");

    Ok(())
}
