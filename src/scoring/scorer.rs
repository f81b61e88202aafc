//! Alignment scoring from CIGAR operations and MD tags.
//!
//! Scores reward aligned bases and penalize gaps with an affine cost:
//!
//! | Kind                          | Contribution for length L |
//! |-------------------------------|---------------------------|
//! | Match, Equal                  | +L                        |
//! | Insertion, Deletion           | -(6 + L)                  |
//! | Diff                          | -L                        |
//! | RefSkip, clips, Pad, Back     | 0                         |
//!
//! Clipping is not penalized here; see [`clip_offsets`].

use std::collections::HashSet;

use crate::core::cigar::{decode, CigarOpKind, CigarOperation, FormatError};
use crate::logging::{Logger, TracingLogger};

/// Fixed cost of opening an insertion or deletion
pub const GAP_OPEN_PENALTY: i64 = 6;

/// Score contribution of one operation
#[must_use]
pub fn contribution(kind: CigarOpKind, len: u32) -> i64 {
    let len = i64::from(len);
    match kind {
        CigarOpKind::Match | CigarOpKind::Equal => len,
        CigarOpKind::Insertion | CigarOpKind::Deletion => -(GAP_OPEN_PENALTY + len),
        CigarOpKind::Diff => -len,
        CigarOpKind::RefSkip
        | CigarOpKind::SoftClip
        | CigarOpKind::HardClip
        | CigarOpKind::Pad
        | CigarOpKind::Back => 0,
    }
}

/// Sum of per-operation contributions
#[must_use]
pub fn score(ops: &[CigarOperation]) -> i64 {
    ops.iter().map(|op| contribution(op.kind, op.len)).sum()
}

/// Leading and trailing soft-clip lengths.
///
/// Only the first and last operations are inspected; interior soft clips
/// are ignored.
#[must_use]
pub fn clip_offsets(ops: &[CigarOperation]) -> (u32, u32) {
    let soft_clip_len = |op: Option<&CigarOperation>| match op {
        Some(op) if op.kind == CigarOpKind::SoftClip => op.len,
        _ => 0,
    };
    (soft_clip_len(ops.first()), soft_clip_len(ops.last()))
}

/// Number of reference bases spanned by the alignment
#[must_use]
pub fn aligned_reference_length(ops: &[CigarOperation]) -> u64 {
    ops.iter()
        .filter(|op| op.kind.consumes_reference())
        .map(|op| u64::from(op.len))
        .sum()
}

/// Count mismatching reference bases in an MD tag.
///
/// The tag is scanned left to right for tokens that are either a run of
/// ASCII letters or a caret followed by a single letter. Letter runs add
/// their length; caret tokens are skipped, so in `^AC` only the `C` is
/// counted. Anything else (digit runs, stray characters) is ignored.
#[must_use]
pub fn mismatch_count(md: &str) -> u64 {
    let bytes = md.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            count += (i - start) as u64;
        } else if bytes[i] == b'^' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            i += 2;
        } else {
            i += 1;
        }
    }

    count
}

/// Scores raw CIGAR operations, warning once per unrecognized operation code.
///
/// Each scoring worker should own its scorer; the set of codes already
/// warned about lives for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct CigarScorer<L: Logger = TracingLogger> {
    logger: L,
    warned: HashSet<u8>,
}

impl CigarScorer<TracingLogger> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_logger(TracingLogger)
    }
}

impl<L: Logger> CigarScorer<L> {
    #[must_use]
    pub fn with_logger(logger: L) -> Self {
        Self {
            logger,
            warned: HashSet::new(),
        }
    }

    /// Score `(code, length)` tuples as stored in BAM records.
    ///
    /// Codes outside `0..=9` contribute nothing.
    pub fn score_codes(&mut self, ops: &[(u8, u32)]) -> i64 {
        let mut total = 0;
        for &(code, len) in ops {
            match CigarOpKind::from_code(code) {
                Some(kind) => total += contribution(kind, len),
                None => {
                    if self.warned.insert(code) {
                        self.logger.warn(&format!(
                            "Unrecognized operator code found in CIGAR string: '{code}'"
                        ));
                    }
                }
            }
        }
        total
    }

    /// Decode and score a CIGAR string
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` if the string is not a valid CIGAR.
    pub fn score_cigar_string(&mut self, cigar: &str) -> Result<i64, FormatError> {
        let ops: Vec<(u8, u32)> = decode(cigar)?
            .ops()
            .iter()
            .map(|op| op.to_code_tuple())
            .collect();
        Ok(self.score_codes(&ops))
    }

    /// Codes that have already triggered a warning
    #[must_use]
    pub fn warned_codes(&self) -> &HashSet<u8> {
        &self.warned
    }

    #[must_use]
    pub fn logger(&self) -> &L {
        &self.logger
    }
}
