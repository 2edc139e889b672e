// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "capture-flow")]
#[command(about = "Camera capture flow: live feed, still preview and upload")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/capture-flow/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List V4L2 capture devices
    Devices,

    /// Open the camera, take one photo and submit it
    Photo {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Interactive session driven by commands on stdin
    Run {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Overrides of the configured device and upload target
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Use a synthetic colour-bar source instead of a camera
    #[arg(long)]
    pub test_pattern: bool,

    /// V4L2 device node, e.g. /dev/video0
    #[arg(short, long)]
    pub device: Option<PathBuf>,

    /// Save submitted photos into this directory
    #[arg(short, long, conflicts_with = "url")]
    pub output: Option<PathBuf>,

    /// Post submitted photos to this capture endpoint
    #[arg(long)]
    pub url: Option<String>,

    /// Photo encoding
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Png,
    Jpeg,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=capture_flow=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Devices => cli::list_devices(),
        Commands::Photo { source } => cli::take_photo(cli.config, source),
        Commands::Run { source } => cli::run_session(cli.config, source),
    }
}
