//! pricedelta - two-source catalog price comparison CLI

use clap::Parser;

use pricedelta::cli::{Cli, Commands};
use pricedelta::error::Result;

mod commands;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            out_dir,
            browser,
        } => commands::cmd_run(config, out_dir, browser),
        Commands::Preview {
            source,
            config,
            json,
        } => commands::cmd_preview(source, config, json),
        Commands::Init { force } => commands::cmd_init(force),
    }
}
