// Tooling crate: unwrap/expect/panic are acceptable outside the library.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod dump;
mod registry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "ID3v2 frame engine development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check host and no_std builds, docs, doctests, lints and formatting
    Check,
    /// Run all tests (unit, integration, and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// List the frame registry
    Frames {
        /// Only frames defined in this ID3v2 minor version (2, 3 or 4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
        version: Option<u8>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decode and print the ID3v2 frames of MP3 files
    Dump {
        /// Files or directories (searched recursively for .mp3)
        #[arg(required = true)]
        paths: Vec<std::path::PathBuf>,
        /// Stop after this many files
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    // RUST_LOG=frames=debug shows per-frame decode events.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Frames { version, json } => registry::run(version, json),
        Commands::Dump { paths, limit } => dump::run(&paths, limit),
    }
}
