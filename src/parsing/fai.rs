//! Reference contig names from a FASTA index (.fai), read with noodles.
//!
//! The index must exist and list every contig once; both conditions are
//! checked before any scoring starts.

use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use noodles::fasta;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReferenceIndexError {
    #[error(
        "could not find fasta index ('{}') for fasta reference. Please index ('samtools faidx {}') before running this program.",
        .index.display(),
        .fasta.display()
    )]
    MissingIndex { index: PathBuf, fasta: PathBuf },

    #[error("Fasta index '{index}' appears to be malformed. Contig {contig} was found more than once")]
    DuplicateContig { index: String, contig: String },

    #[error("Fasta index '{index}' lists no contigs")]
    Empty { index: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Contig names of a reference, in index order
#[derive(Debug, Clone, Default)]
pub struct ReferenceContigs {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ReferenceContigs {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Index path for a reference: `.fai` paths are used as-is, anything else
/// gets `.fai` appended
#[must_use]
pub fn index_path(reference: &Path) -> PathBuf {
    let is_fai = reference
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("fai"));

    if is_fai {
        reference.to_path_buf()
    } else {
        let mut path = reference.as_os_str().to_owned();
        path.push(".fai");
        PathBuf::from(path)
    }
}

/// Load the contig names for a FASTA reference (or its `.fai` directly)
///
/// # Errors
///
/// Returns `ReferenceIndexError::MissingIndex` if there is no index,
/// `ReferenceIndexError::DuplicateContig` if a name repeats, or a parse
/// error if the index is unreadable.
pub fn load_reference_contigs(reference: &Path) -> Result<ReferenceContigs, ReferenceIndexError> {
    let index = index_path(reference);
    if !index.exists() {
        return Err(ReferenceIndexError::MissingIndex {
            index,
            fasta: reference.to_path_buf(),
        });
    }

    let reader = std::fs::File::open(&index).map(BufReader::new)?;
    let contigs = read_reference_contigs(reader, &index.display().to_string())?;
    debug!(index = %index.display(), contigs = contigs.len(), "Loaded reference index");
    Ok(contigs)
}

/// Read contig names from FAI content; `label` names the source in errors
///
/// # Errors
///
/// Returns `ReferenceIndexError::DuplicateContig` if a name repeats,
/// `ReferenceIndexError::Empty` if there are no records, or
/// `ReferenceIndexError::Noodles` if a line is malformed.
pub fn read_reference_contigs<R: BufRead>(
    reader: R,
    label: &str,
) -> Result<ReferenceContigs, ReferenceIndexError> {
    let index = fasta::fai::io::Reader::new(reader)
        .read_index()
        .map_err(|e| ReferenceIndexError::Noodles(format!("Failed to parse FAI file: {e}")))?;

    let mut contigs = ReferenceContigs::default();
    for record in index.as_ref() {
        let name = String::from_utf8_lossy(record.name()).to_string();
        if !contigs.lookup.insert(name.clone()) {
            return Err(ReferenceIndexError::DuplicateContig {
                index: label.to_string(),
                contig: name,
            });
        }
        contigs.names.push(name);
    }

    if contigs.is_empty() {
        return Err(ReferenceIndexError::Empty {
            index: label.to_string(),
        });
    }

    Ok(contigs)
}
