//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Motion Descriptor - Turn hand-tracking frames into recorded gesture sequences
#[derive(Parser, Debug)]
#[command(name = "motion-desc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a gesture sequence from a frame stream
    Record {
        /// Input frame stream (JSON Lines, one hand frame per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Gesture name for the recorded sequence
        #[arg(short, long)]
        name: String,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a statistical summary of a recorded sequence
    Summary {
        /// Path to a recorded sequence file
        input: PathBuf,
    },

    /// List recorded sequences
    List {
        /// Directory to list (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Validate a recorded sequence file against the schema
    Validate {
        /// Path to a recorded sequence file
        input: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
