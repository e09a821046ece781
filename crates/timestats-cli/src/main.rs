//! CLI for compositor frame-timing stats.
//!
//! Replays recorded captures through the stats engine and dumps the result
//! as diagnostic text, JSON or compact binary wire records.

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "timestats")]
#[command(about = "Compositor frame-timing stats CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter directive (e.g. "debug", "timestats_core=trace")
    #[arg(long, global = true, env = "TIMESTATS_LOG")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a capture file and dump the resulting stats
    Dump {
        /// Path to the JSON capture file
        capture: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: DumpFormat,

        /// Write to this file instead of stdout (required for binary)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Decode a binary dump and print it as JSON
    Inspect {
        /// Path to a binary dump produced by `dump --format binary`
        path: PathBuf,
    },
}

/// Available dump formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    /// Human-readable diagnostic text (default)
    Text,
    /// Wire records as pretty-printed JSON
    Json,
    /// Wire records as compact binary
    Binary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log.as_deref())?;

    match cli.command {
        Commands::Dump {
            capture,
            format,
            output,
        } => commands::dump(&capture, format, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
    }
}
