//! CIGAR operations and the text decoder.
//!
//! The operation alphabet and its numeric codes are those of SAM/BAM
//! records and must match upstream producers byte-for-byte:
//!
//! | Letter | Kind       | Code |
//! |--------|------------|------|
//! | `M`    | Match      | 0    |
//! | `I`    | Insertion  | 1    |
//! | `D`    | Deletion   | 2    |
//! | `N`    | RefSkip    | 3    |
//! | `S`    | SoftClip   | 4    |
//! | `H`    | HardClip   | 5    |
//! | `P`    | Pad        | 6    |
//! | `=`    | Equal      | 7    |
//! | `X`    | Diff       | 8    |
//! | `B`    | Back       | 9    |

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operation letters, indexed by BAM operation code.
pub const CIGAR_ALPHABET: &[u8; 10] = b"MIDNSHP=XB";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid CIGAR '{cigar}': expected a length before position {position}")]
    MissingLength { cigar: String, position: usize },

    #[error("Invalid CIGAR '{cigar}': unrecognized operation '{letter}' at position {position}")]
    UnknownOperation {
        cigar: String,
        letter: char,
        position: usize,
    },

    #[error("Invalid CIGAR '{cigar}': length without an operation at end of string")]
    TrailingLength { cigar: String },

    #[error("Invalid CIGAR '{cigar}': zero-length operation at position {position}")]
    ZeroLength { cigar: String, position: usize },

    #[error("Invalid CIGAR '{cigar}': operation length overflows at position {position}")]
    LengthOverflow { cigar: String, position: usize },
}

/// Kind of a CIGAR operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CigarOpKind {
    Match,
    Insertion,
    Deletion,
    RefSkip,
    SoftClip,
    HardClip,
    Pad,
    Equal,
    Diff,
    Back,
}

impl CigarOpKind {
    const ALL: [Self; 10] = [
        Self::Match,
        Self::Insertion,
        Self::Deletion,
        Self::RefSkip,
        Self::SoftClip,
        Self::HardClip,
        Self::Pad,
        Self::Equal,
        Self::Diff,
        Self::Back,
    ];

    /// Look up a kind by its BAM operation code
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Look up a kind by its CIGAR letter
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let byte = u8::try_from(letter).ok()?;
        CIGAR_ALPHABET
            .iter()
            .position(|&b| b == byte)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// BAM operation code (0..=9)
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn letter(self) -> char {
        char::from(CIGAR_ALPHABET[usize::from(self.code())])
    }

    /// Whether this operation advances along the reference
    #[must_use]
    pub fn consumes_reference(self) -> bool {
        matches!(
            self,
            Self::Match | Self::Deletion | Self::RefSkip | Self::Equal | Self::Diff
        )
    }
}

impl fmt::Display for CigarOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single CIGAR operation: a kind and the number of bases it spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CigarOperation {
    pub kind: CigarOpKind,
    pub len: u32,
}

impl CigarOperation {
    #[must_use]
    pub fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }

    /// Raw `(code, length)` form, as found in BAM records
    #[must_use]
    pub fn to_code_tuple(self) -> (u8, u32) {
        (self.kind.code(), self.len)
    }
}

impl fmt::Display for CigarOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind)
    }
}

/// An ordered sequence of CIGAR operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cigar(pub Vec<CigarOperation>);

impl Cigar {
    #[must_use]
    pub fn ops(&self) -> &[CigarOperation] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[CigarOperation]> for Cigar {
    fn as_ref(&self) -> &[CigarOperation] {
        &self.0
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.0 {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Cigar {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Decode a CIGAR string such as `10S90M2I8M` into its operations.
///
/// The whole string must be a concatenation of `<digits><letter>` tokens.
/// An empty string decodes to an empty CIGAR.
///
/// # Errors
///
/// Returns a `FormatError` if a token lacks its length, uses a letter
/// outside `MIDNSHP=XB`, has a zero length, overflows `u32`, or if the
/// string ends in a dangling length.
pub fn decode(cigar: &str) -> Result<Cigar, FormatError> {
    let mut ops = Vec::new();
    let mut len: Option<u32> = None;

    for (position, c) in cigar.char_indices() {
        if let Some(digit) = c.to_digit(10) {
            let next = len
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|l| l.checked_add(digit))
                .ok_or_else(|| FormatError::LengthOverflow {
                    cigar: cigar.to_string(),
                    position,
                })?;
            len = Some(next);
            continue;
        }

        let Some(kind) = CigarOpKind::from_letter(c) else {
            return Err(FormatError::UnknownOperation {
                cigar: cigar.to_string(),
                letter: c,
                position,
            });
        };

        match len.take() {
            None => {
                return Err(FormatError::MissingLength {
                    cigar: cigar.to_string(),
                    position,
                })
            }
            Some(0) => {
                return Err(FormatError::ZeroLength {
                    cigar: cigar.to_string(),
                    position,
                })
            }
            Some(l) => ops.push(CigarOperation::new(kind, l)),
        }
    }

    if len.is_some() {
        return Err(FormatError::TrailingLength {
            cigar: cigar.to_string(),
        });
    }

    Ok(Cigar(ops))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        let cigar = decode("10S90M2I8M").unwrap();
        assert_eq!(
            cigar.ops(),
            &[
                CigarOperation::new(CigarOpKind::SoftClip, 10),
                CigarOperation::new(CigarOpKind::Match, 90),
                CigarOperation::new(CigarOpKind::Insertion, 2),
                CigarOperation::new(CigarOpKind::Match, 8),
            ]
        );
    }

    #[test]
    fn test_decode_every_letter() {
        let cigar = decode("1M2I3D4N5S6H7P8=9X10B").unwrap();
        let kinds: Vec<CigarOpKind> = cigar.ops().iter().map(|op| op.kind).collect();
        assert_eq!(kinds, CigarOpKind::ALL.to_vec());
        let codes: Vec<u8> = cigar.ops().iter().map(|op| op.kind.code()).collect();
        assert_eq!(codes, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_multi_digit_lengths() {
        let cigar = decode("150M").unwrap();
        assert_eq!(cigar.ops()[0].len, 150);
    }

    #[test]
    fn test_decode_rejects_unknown_letter() {
        let err = decode("10M5Q").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownOperation {
                cigar: "10M5Q".to_string(),
                letter: 'Q',
                position: 4,
            }
        );
    }

    #[test]
    fn test_decode_rejects_missing_length() {
        assert!(matches!(
            decode("M10"),
            Err(FormatError::MissingLength { position: 0, .. })
        ));
        assert!(matches!(
            decode("10MM"),
            Err(FormatError::MissingLength { position: 3, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_digits() {
        assert!(matches!(
            decode("10M5"),
            Err(FormatError::TrailingLength { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_zero_length() {
        assert!(matches!(
            decode("0M"),
            Err(FormatError::ZeroLength { position: 1, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_star_and_whitespace() {
        assert!(decode("*").is_err());
        assert!(decode("10M ").is_err());
        assert!(decode(" 10M").is_err());
    }

    #[test]
    fn test_decode_rejects_overflow() {
        assert!(matches!(
            decode("99999999999M"),
            Err(FormatError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn test_display_reencodes() {
        let text = "3S12M1D4=1X2N6M5H";
        assert_eq!(decode(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_kind_lookups() {
        assert_eq!(CigarOpKind::from_letter('='), Some(CigarOpKind::Equal));
        assert_eq!(CigarOpKind::from_letter('m'), None);
        assert_eq!(CigarOpKind::from_letter('é'), None);
        assert_eq!(CigarOpKind::from_code(9), Some(CigarOpKind::Back));
        assert_eq!(CigarOpKind::from_code(10), None);
        assert_eq!(CigarOpKind::Diff.letter(), 'X');
    }

    #[test]
    fn test_consumes_reference() {
        let consuming: Vec<CigarOpKind> = CigarOpKind::ALL
            .iter()
            .copied()
            .filter(|k| k.consumes_reference())
            .collect();
        assert_eq!(
            consuming,
            vec![
                CigarOpKind::Match,
                CigarOpKind::Deletion,
                CigarOpKind::RefSkip,
                CigarOpKind::Equal,
                CigarOpKind::Diff,
            ]
        );
    }
}
