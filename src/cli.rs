use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Which of the two configured sources to operate on
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceSide {
    Ours,
    Competitor,
}

#[derive(Parser)]
#[command(name = "pricedelta")]
#[command(author, version, about = "Catalog price comparison against a competitor storefront", long_about = None)]
#[command(after_help = r#"Examples:
  pricedelta run                         Fetch both catalogs, write today's report
  pricedelta run --out-dir ./reports     Put comparison_<date>.xlsx somewhere specific
  pricedelta run --browser               Force the headless-browser engine (lazy-loaded grids)
  pricedelta preview ours                Show what the extractor sees on our site
  pricedelta preview competitor --json   Machine-readable catalog dump
  pricedelta init                        Write a starter config to edit

Quick Start:
  1. pricedelta init
  2. Edit the config with your two catalog URLs and class fragments
  3. pricedelta run
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch both catalogs, match products, write the dated xlsx report
    #[command(after_help = r#"Examples:
  pricedelta run
  pricedelta run --config ./sources.toml
  pricedelta run --out-dir ./reports --browser
"#)]
    Run {
        /// Path to a config file (default: the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the report file (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Force the headless-browser engine for both sources
        #[arg(long)]
        browser: bool,
    },

    /// Fetch one source and print its extracted catalog
    Preview {
        /// Which configured source to preview
        #[arg(value_enum)]
        source: SourceSide,

        /// Path to a config file (default: the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write the default config file to the user config directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
