//! Threshold-count tables: a `Threshold` column followed by one column per
//! category label (`CONTAM`, `REF`).
//!
//! ```text
//! Threshold	CONTAM	REF
//! 0	5	10
//! 1	8	2
//! ```
//!
//! Columns may appear in any order and unrecognized columns are ignored,
//! so a full precision/recall table can be read back as counts.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::core::counts::{Category, CategoryCounts, ThresholdCounts};
use crate::parsing::open_reader;
use crate::parsing::sam::ParseError;
use crate::utils::format::format_g;

/// Read a threshold-count table from a file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if the content is invalid.
pub fn parse_counts_file(path: &Path) -> Result<ThresholdCounts, ParseError> {
    let mut text = String::new();
    open_reader(path)?.read_to_string(&mut text)?;
    parse_counts_text(&text)
}

/// Parse threshold-count table text.
///
/// Repeated thresholds are summed.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header lacks `Threshold`,
/// `REF` or `CONTAM`, a value does not parse, the counts sum past
/// `u64::MAX`, or there are no data rows.
pub fn parse_counts_text(text: &str) -> Result<ThresholdCounts, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'));

    let Some((_, header)) = lines.next() else {
        return Err(ParseError::InvalidFormat(
            "Counts table is empty".to_string(),
        ));
    };

    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let threshold_col = columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case("threshold"))
        .ok_or_else(|| {
            ParseError::InvalidFormat("Counts table has no 'Threshold' column".to_string())
        })?;
    let category_cols: Vec<(usize, Category)> = columns
        .iter()
        .enumerate()
        .filter_map(|(i, c)| Category::parse(c).map(|cat| (i, cat)))
        .collect();
    for category in [Category::Ref, Category::Contam] {
        if !category_cols.iter().any(|(_, c)| *c == category) {
            return Err(ParseError::InvalidFormat(format!(
                "Counts table has no '{category}' column"
            )));
        }
    }

    let mut counts = ThresholdCounts::new();
    // Every cumulative sum in the precision/recall table is bounded by this
    let mut total: u64 = 0;
    for (i, line) in lines {
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        let field = |col: usize| {
            fields.get(col).copied().ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Line {line_num} has {} fields, expected {}",
                    fields.len(),
                    columns.len()
                ))
            })
        };

        let raw_threshold = field(threshold_col)?;
        let threshold: f64 = raw_threshold.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid threshold on line {line_num}: '{raw_threshold}'"
            ))
        })?;

        let mut row = CategoryCounts::default();
        for &(col, category) in &category_cols {
            let raw = field(col)?;
            let n: u64 = raw.parse().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid {category} count on line {line_num}: '{raw}'"
                ))
            })?;
            total = total.checked_add(n).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Counts on line {line_num} overflow the total read count"
                ))
            })?;
            row.add(category, n);
        }

        counts.add(threshold, Category::Ref, row.ref_count);
        counts.add(threshold, Category::Contam, row.contam_count);
    }

    if counts.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No thresholds found in counts table".to_string(),
        ));
    }

    Ok(counts)
}

/// Write counts as a threshold-count table
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_counts<W: Write>(counts: &ThresholdCounts, mut writer: W) -> io::Result<()> {
    let labels = Category::sorted_labels();
    writeln!(writer, "Threshold\t{}", labels.join("\t"))?;
    for (threshold, c) in counts.iter() {
        let values: Vec<String> = labels
            .iter()
            .filter_map(|label| Category::parse(label))
            .map(|category| c.get(category).to_string())
            .collect();
        writeln!(writer, "{}\t{}", format_g(threshold, 6), values.join("\t"))?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts_text() {
        let text = "Threshold\tCONTAM\tREF\n1\t8\t2\n0\t5\t10\n";
        let counts = parse_counts_text(text).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(0.0), Some(&CategoryCounts::new(10, 5)));
        assert_eq!(counts.get(1.0), Some(&CategoryCounts::new(2, 8)));
    }

    #[test]
    fn test_parse_counts_column_order_and_extras() {
        let text = "# counts\nREF\tThreshold\tCONTAM\tTP\n3\t-2.5\t1\t99\n\n4\t-2.5\t0\t99\n";
        let counts = parse_counts_text(text).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(-2.5), Some(&CategoryCounts::new(7, 1)));
    }

    #[test]
    fn test_parse_counts_missing_column() {
        let err = parse_counts_text("Threshold\tREF\n0\t1\n").unwrap_err();
        assert!(err.to_string().contains("CONTAM"));
    }

    #[test]
    fn test_parse_counts_bad_value() {
        let err = parse_counts_text("Threshold\tCONTAM\tREF\n0\tfive\t1\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_counts_rejects_overflowing_total() {
        let text = "Threshold\tCONTAM\tREF\n0\t18446744073709551615\t1\n1\t1\t1\n";
        let err = parse_counts_text(text).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
        assert!(err.to_string().contains("line 2"));

        let text = "Threshold\tCONTAM\tREF\n0\t18446744073709551615\t0\n";
        let counts = parse_counts_text(text).unwrap();
        assert_eq!(counts.totals().total(), u64::MAX);
    }

    #[test]
    fn test_parse_counts_short_line() {
        assert!(parse_counts_text("Threshold\tCONTAM\tREF\n0\t1\n").is_err());
    }

    #[test]
    fn test_parse_counts_no_rows() {
        assert!(parse_counts_text("Threshold\tCONTAM\tREF\n").is_err());
        assert!(parse_counts_text("").is_err());
    }

    #[test]
    fn test_write_counts() {
        let counts: ThresholdCounts = [
            (12.0, CategoryCounts::new(3, 1)),
            (-7.0, CategoryCounts::new(0, 4)),
        ]
        .into_iter()
        .collect();
        let mut out = Vec::new();
        write_counts(&counts, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Threshold\tCONTAM\tREF\n-7\t4\t0\n12\t1\t3\n"
        );
    }
}
