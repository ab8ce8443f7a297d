//! langlink - localize the language-switch links of a built documentation site.

mod cli;
mod config;
mod core;
mod dom;
mod localize;
mod logger;
mod site;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Localize { args } = &cli.command {
        logger::set_verbose(args.verbose);
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Localize { args } => cli::localize::localize_site(args, &config),
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
    }
}
