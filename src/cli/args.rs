//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// langlink: localize language-switch links of a built documentation site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Built site directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: langlink.toml)
    #[arg(short = 'C', long, global = true, default_value = "langlink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Override supported languages (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Override site URL (its path is the location prefix of every page)
    ///
    /// Example: pages served under https://example.github.io/project/
    ///   langlink localize --site-url "https://example.github.io/project/"
    #[arg(short = 'U', long = "site-url", global = true, value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite language-switch links in the built site
    #[command(visible_alias = "l")]
    Localize {
        #[command(flatten)]
        args: LocalizeArgs,
    },

    /// Print the localized path for a location
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },
}

/// Localize command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct LocalizeArgs {
    /// Pages or directories inside the output directory.
    /// If omitted, every page of the site is processed.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Report what would change without writing any file
    #[arg(short, long)]
    pub dry: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Page location: a site path (`/guide/?x=1#top`) or an absolute URL
    #[arg(value_name = "LOCATION")]
    pub location: String,

    /// Only resolve this language (default: every supported language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Print JSON instead of plain lines
    #[arg(short, long)]
    pub json: bool,
}
