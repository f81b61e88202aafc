//! Alignment scoring.
//!
//! - [`scorer`]: score table, clip offsets, reference span, MD mismatches
//!   and the [`CigarScorer`](scorer::CigarScorer) for raw operation codes
//! - [`read`]: all metrics for one alignment record

pub mod read;
pub mod scorer;
