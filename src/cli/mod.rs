//! Command-line interface for contam-bench.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **cigar**: Score a single CIGAR string (and optional MD tag)
//! - **score**: Score reference and contaminant read alignments and tally
//!   reads per score threshold
//! - **stats**: Build the precision/recall table from threshold counts
//!
//! ## Usage
//!
//! ```text
//! # Inspect one alignment
//! contam-bench cigar 5S90M2I3M --md 40A52
//!
//! # Tally reads from both read sets, checking contigs against the reference
//! contam-bench score --ref-reads ref.sam --contam-reads contam.sam \
//!     --reference genome.fa --counts counts.tsv
//!
//! # Precision/recall table and average precision
//! contam-bench stats counts.tsv --output pr.tsv
//! ```

use clap::{Parser, Subcommand};

pub mod cigar;
pub mod score;
pub mod stats;

#[derive(Parser)]
#[command(name = "contam-bench")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Score alignments and benchmark reference vs contaminant read classification")]
#[command(
    long_about = "contam-bench scores read alignments from their CIGAR strings and MD tags, tallies reference and contaminant reads per score threshold, and summarizes how well the thresholds separate the two as a precision/recall table with average precision."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single CIGAR string
    Cigar(cigar::CigarArgs),

    /// Score read alignments and tally reads per threshold
    Score(score::ScoreArgs),

    /// Build the precision/recall table from threshold counts
    Stats(stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
