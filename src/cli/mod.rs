//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod list;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, LoadedConfig};
use crate::shirt::ShirtAssets;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Ribbonrack - compose a ribbon shirt from badges and a nametape
#[derive(Parser)]
#[command(name = "rack")]
#[command(about = "Ribbonrack - compose award ribbon shirts and export them as images")]
#[command(version)]
pub struct Cli {
    /// Path to rack.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available ribbons and commendations in display order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a shirt from the selected badges
    Generate {
        /// Ribbon to include (repeatable)
        #[arg(short, long = "ribbon", value_name = "NAME")]
        ribbons: Vec<String>,

        /// Commendation to include (repeatable)
        #[arg(short, long = "commendation", value_name = "NAME")]
        commendations: Vec<String>,

        /// Text for the nametape (letters and spaces, upper-cased)
        #[arg(short, long, default_value = "")]
        name: String,

        /// Add the golden award
        #[arg(long)]
        golden: bool,

        /// Output file. Without it nothing is written.
        /// `.png` is appended when the name has no extension.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write an upscaled preview (1-16, default: 1 = native size)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,

        /// Write the preview at the configured preview scale
        #[arg(long, conflicts_with = "scale")]
        preview: bool,

        /// Strict mode: badges larger than their cell are errors
        #[arg(long)]
        strict: bool,
    },
}

/// Install the logger; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Load configuration, reporting failures on stderr.
pub(crate) fn load_or_report(path: Option<&Path>) -> Result<LoadedConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Load every startup asset, reporting failures on stderr.
pub(crate) fn load_assets_or_report(loaded: &LoadedConfig) -> Result<ShirtAssets, ExitCode> {
    ShirtAssets::load(&loaded.config.assets, &loaded.root).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::List { json } => list::run_list(config, json),
        Commands::Generate {
            ribbons,
            commendations,
            name,
            golden,
            output,
            scale,
            preview,
            strict,
        } => generate::run_generate(
            config,
            ribbons,
            commendations,
            &name,
            golden,
            output.as_deref(),
            if preview { None } else { Some(scale) },
            strict,
        ),
    }
}
