//! Core data types.
//!
//! - [`cigar`]: CIGAR operations, their BAM codes, and the string decoder
//! - [`counts`]: read categories and per-threshold counts
//!
//! ## Operation codes
//!
//! CIGAR letters map to codes by their position in `MIDNSHP=XB`, the same
//! ordering BAM records use. Code-based APIs accept anything in `0..=9`.

pub mod cigar;
pub mod counts;
