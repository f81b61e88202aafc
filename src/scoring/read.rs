use serde::Serialize;

use crate::core::cigar::{decode, Cigar, FormatError};
use crate::logging::Logger;
use crate::scoring::scorer::{aligned_reference_length, clip_offsets, mismatch_count, CigarScorer};

/// All per-alignment metrics derived from a CIGAR string and optional MD tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadScore {
    pub score: i64,
    pub leading_soft_clip: u32,
    pub trailing_soft_clip: u32,
    pub aligned_reference_length: u64,
    /// `None` when the record carries no MD tag
    pub mismatches: Option<u64>,
}

impl ReadScore {
    /// Score one decoded alignment
    pub fn from_cigar<L: Logger>(
        scorer: &mut CigarScorer<L>,
        cigar: &Cigar,
        md: Option<&str>,
    ) -> Self {
        let ops = cigar.ops();
        let codes: Vec<(u8, u32)> = ops.iter().map(|op| op.to_code_tuple()).collect();
        let (leading_soft_clip, trailing_soft_clip) = clip_offsets(ops);

        Self {
            score: scorer.score_codes(&codes),
            leading_soft_clip,
            trailing_soft_clip,
            aligned_reference_length: aligned_reference_length(ops),
            mismatches: md.map(mismatch_count),
        }
    }

    /// Decode and score one alignment
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` if `cigar` is not a valid CIGAR string.
    pub fn from_strings<L: Logger>(
        scorer: &mut CigarScorer<L>,
        cigar: &str,
        md: Option<&str>,
    ) -> Result<Self, FormatError> {
        Ok(Self::from_cigar(scorer, &decode(cigar)?, md))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::RecordingLogger;

    #[test]
    fn test_from_strings() {
        let mut scorer = CigarScorer::with_logger(RecordingLogger::default());
        let read = ReadScore::from_strings(&mut scorer, "4S20M1I5M2S", Some("10A14")).unwrap();
        assert_eq!(
            read,
            ReadScore {
                score: 18,
                leading_soft_clip: 4,
                trailing_soft_clip: 2,
                aligned_reference_length: 25,
                mismatches: Some(1),
            }
        );
    }

    #[test]
    fn test_from_strings_without_md() {
        let mut scorer = CigarScorer::with_logger(RecordingLogger::default());
        let read = ReadScore::from_strings(&mut scorer, "50M", None).unwrap();
        assert_eq!(read.mismatches, None);
        assert_eq!(read.score, 50);
    }

    #[test]
    fn test_from_cigar_matches_from_strings() {
        let mut scorer = CigarScorer::with_logger(RecordingLogger::default());
        let cigar = decode("10S5M2I3M3S").unwrap();
        let read = ReadScore::from_cigar(&mut scorer, &cigar, Some("10A5^AC3"));
        assert_eq!(
            read,
            ReadScore::from_strings(&mut scorer, "10S5M2I3M3S", Some("10A5^AC3")).unwrap()
        );
        assert_eq!(read.score, 0);
        assert_eq!(read.mismatches, Some(2));
    }

    #[test]
    fn test_from_strings_rejects_bad_cigar() {
        let mut scorer = CigarScorer::with_logger(RecordingLogger::default());
        assert!(ReadScore::from_strings(&mut scorer, "50M3", None).is_err());
    }
}
