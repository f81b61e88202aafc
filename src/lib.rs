//! # contam-bench
//!
//! A library for scoring read alignments and benchmarking how well a score
//! threshold separates reads from a reference genome from contaminant reads.
//!
//! Two independent engines make up the core:
//!
//! - **Alignment scoring**: decode CIGAR strings, score them with an affine
//!   gap penalty, report soft-clip offsets and reference span, and count
//!   mismatches from MD tags
//! - **Benchmark statistics**: turn per-threshold `REF`/`CONTAM` read counts
//!   into a cumulative precision/recall table with F-scores and average
//!   precision
//!
//! ## Example
//!
//! ```rust
//! use contam_bench::core::cigar::decode;
//! use contam_bench::core::counts::{CategoryCounts, ThresholdCounts};
//! use contam_bench::benchmark::stats::build_table;
//! use contam_bench::scoring::scorer::{clip_offsets, score};
//!
//! let cigar = decode("10S5M2I3M3S").unwrap();
//! assert_eq!(score(cigar.ops()), 0);
//! assert_eq!(clip_offsets(cigar.ops()), (10, 3));
//!
//! let counts: ThresholdCounts = [
//!     (0.0, CategoryCounts::new(10, 5)),
//!     (1.0, CategoryCounts::new(2, 8)),
//! ]
//! .into_iter()
//! .collect();
//! let rows = build_table(&counts);
//! assert_eq!(rows[1].true_positive, 8);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: CIGAR operations and threshold counts
//! - [`scoring`]: Alignment scoring
//! - [`benchmark`]: Precision/recall statistics and table output
//! - [`parsing`]: SAM/BAM records, FASTA indexes, and count tables
//! - [`logging`]: The logging capability used by the engines
//! - [`cli`]: Command-line interface implementation

pub mod benchmark;
pub mod cli;
pub mod core;
pub mod logging;
pub mod parsing;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::benchmark::stats::{average_precision, build_table, PrecisionRecallRow};
pub use crate::core::cigar::{decode, Cigar, CigarOpKind, CigarOperation, FormatError};
pub use crate::core::counts::{Category, CategoryCounts, ThresholdCounts};
pub use crate::logging::{Logger, TracingLogger};
pub use crate::scoring::scorer::CigarScorer;
