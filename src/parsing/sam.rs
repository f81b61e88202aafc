//! Streaming reader for SAM and BAM alignment records.
//!
//! Records are decoded by noodles and only the fields needed for scoring
//! are kept: read name, flags, reference name, CIGAR and the `MD` tag.
//! The format is chosen from the file extension: `.bam` is read as BAM,
//! `.sam`, `.sam.gz` and stdin (`-`) as SAM.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::Flags;
use noodles::sam::alignment::record_buf::data::field::Value;
use noodles::sam::alignment::record_buf::RecordBuf;
use thiserror::Error;

use crate::core::cigar::{Cigar, CigarOpKind, CigarOperation};
use crate::parsing::open_reader;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl From<Kind> for CigarOpKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Match => Self::Match,
            Kind::Insertion => Self::Insertion,
            Kind::Deletion => Self::Deletion,
            Kind::Skip => Self::RefSkip,
            Kind::SoftClip => Self::SoftClip,
            Kind::HardClip => Self::HardClip,
            Kind::Pad => Self::Pad,
            Kind::SequenceMatch => Self::Equal,
            Kind::SequenceMismatch => Self::Diff,
        }
    }
}

/// The scoring-relevant fields of one alignment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub name: String,
    pub flags: Flags,
    /// `None` when the record has no reference sequence
    pub contig: Option<String>,
    pub cigar: Cigar,
    pub md: Option<String>,
}

impl AlignmentRecord {
    /// Extract the scoring fields from a decoded noodles record
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if an operation length does not
    /// fit in `u32` or the `MD` tag is not a string.
    pub fn from_record_buf(header: &sam::Header, record: &RecordBuf) -> Result<Self, ParseError> {
        let name = record
            .name()
            .map(std::string::ToString::to_string)
            .unwrap_or_default();

        let contig = record
            .reference_sequence_id()
            .and_then(|id| header.reference_sequences().get_index(id))
            .map(|(contig, _)| contig.to_string());

        let cigar = convert_cigar(&name, record.cigar().as_ref())?;

        let md_tag = Tag::from([b'M', b'D']);
        let md = match record.data().get(&md_tag) {
            Some(Value::String(s)) => Some(String::from_utf8_lossy(s.as_ref()).into_owned()),
            Some(_) => {
                return Err(ParseError::InvalidFormat(format!(
                    "MD tag of read '{name}' is not a string"
                )))
            }
            None => None,
        };

        Ok(Self {
            name,
            flags: record.flags(),
            contig,
            cigar,
            md,
        })
    }

    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        self.flags.is_unmapped()
    }

    /// Mapped, placed on a contig, and neither secondary nor supplementary
    #[must_use]
    pub fn is_primary_mapped(&self) -> bool {
        !self.is_unmapped()
            && !self.flags.is_secondary()
            && !self.flags.is_supplementary()
            && self.contig.is_some()
            && !self.cigar.is_empty()
    }
}

fn convert_cigar(name: &str, ops: &[Op]) -> Result<Cigar, ParseError> {
    ops.iter()
        .map(|op| {
            let len = u32::try_from(op.len()).map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "CIGAR operation length {} of read '{name}' overflows",
                    op.len()
                ))
            })?;
            Ok(CigarOperation::new(CigarOpKind::from(op.kind()), len))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Cigar)
}

/// Reads the next record into `record`, returning 0 at end of input
trait RecordSource {
    fn read_record(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize>;
}

impl<R: BufRead> RecordSource for sam::io::Reader<R> {
    fn read_record(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

impl<R: Read> RecordSource for bam::io::Reader<R> {
    fn read_record(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

/// Iterator over the records of a SAM or BAM stream
pub struct AlignmentRecords {
    source: Box<dyn RecordSource>,
    header: sam::Header,
    record: RecordBuf,
}

impl AlignmentRecords {
    /// Read the SAM header from `reader` and stream the records after it
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header cannot be parsed.
    pub fn from_sam<R: BufRead + 'static>(reader: R) -> Result<Self, ParseError> {
        let mut reader = sam::io::Reader::new(reader);
        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;
        Ok(Self::new(Box::new(reader), header))
    }

    /// Read the BAM header from `reader` and stream the records after it
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header cannot be parsed.
    pub fn from_bam<R: Read + 'static>(reader: R) -> Result<Self, ParseError> {
        let mut reader = bam::io::Reader::new(reader);
        let header = reader
            .read_header()
            .map_err(|e| ParseError::Noodles(e.to_string()))?;
        Ok(Self::new(Box::new(reader), header))
    }

    fn new(source: Box<dyn RecordSource>, header: sam::Header) -> Self {
        Self {
            source,
            header,
            record: RecordBuf::default(),
        }
    }

    #[must_use]
    pub fn header(&self) -> &sam::Header {
        &self.header
    }
}

impl Iterator for AlignmentRecords {
    type Item = Result<AlignmentRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.source.read_record(&self.header, &mut self.record) {
            Ok(0) => None,
            Ok(_) => Some(AlignmentRecord::from_record_buf(&self.header, &self.record)),
            Err(e) => Some(Err(ParseError::Noodles(e.to_string()))),
        }
    }
}

/// Open a SAM or BAM file, choosing the reader by extension.
/// SAM may be gzip-compressed; `-` reads SAM from stdin.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened,
/// `ParseError::UnsupportedFormat` for unknown extensions, or
/// `ParseError::Noodles` if the header cannot be parsed.
pub fn read_records(path: &Path) -> Result<AlignmentRecords, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("sam" | "gz") | None => AlignmentRecords::from_sam(open_reader(path)?),
        Some("bam") => AlignmentRecords::from_bam(File::open(path)?),
        Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
    }
}
