//! Readers for the files around the scoring core.
//!
//! - **SAM/BAM records**: stream the fields needed to score each alignment
//! - **FASTA index (.fai)**: the set of reference contig names
//! - **Threshold counts**: the per-threshold `REF`/`CONTAM` tallies
//!
//! Plain and gzip-compressed (`.gz`) inputs are both accepted, and `-`
//! reads from stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

pub mod counts;
pub mod fai;
pub mod sam;

/// Open `path` for buffered reading, decompressing `.gz` files
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened.
pub fn open_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)?;
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
