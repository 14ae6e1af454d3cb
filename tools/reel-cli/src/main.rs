//! commit-reel CLI: turn a repository's history into a movie.
//!
//! Usage:
//!   commit-reel make                 Fetch avatars, render, and encode
//!   commit-reel avatars              Fetch contributor avatars only
//!   commit-reel count-frames [PATH]  Count frames in a raw PPM stream
//!   commit-reel plan [--frames N]    Print commands and filter graph
//!   commit-reel check                Check external tools and inputs
//!   commit-reel init [PATH]          Write the default configuration

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reel_common::config::{LoggingConfig, ReelConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "commit-reel",
    about = "Render a promotional movie of a repository's commit history",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (defaults to the built-in production values)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole pipeline
    Make,

    /// Fetch contributor avatars from the commit log
    Avatars,

    /// Count frames in a raw PPM stream
    CountFrames {
        /// Stream to inspect (defaults to the configured visualizer output)
        path: Option<PathBuf>,
    },

    /// Print the visualizer and encoder commands without running them
    Plan {
        /// Frame count to plan for (defaults to counting the existing stream)
        #[arg(long)]
        frames: Option<u64>,
    },

    /// Check that external tools and input files are available
    Check,

    /// Write the default configuration as JSON
    Init {
        /// Destination file
        #[arg(default_value = "commit-reel.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, source) = ReelConfig::load_or_default(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    reel_common::logging::init_logging(&LoggingConfig {
        level,
        json: config.logging.json,
    });
    source.log();

    let result = match cli.command {
        Commands::Make => commands::make::run(config).await,
        Commands::Avatars => commands::avatars::run(config).await,
        Commands::CountFrames { path } => commands::count_frames::run(config, path),
        Commands::Plan { frames } => commands::plan::run(config, frames),
        Commands::Check => commands::check::run(config),
        Commands::Init { path, force } => commands::init::run(path, force),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match commands::commit_log_exit(&err) {
            Some(code) => Ok(ExitCode::from(code)),
            None => Err(err),
        },
    }
}
