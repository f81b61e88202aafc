//! Tab-separated rendering of the precision/recall table.

use std::io::{self, Write};

use crate::benchmark::stats::PrecisionRecallRow;
use crate::core::counts::{Category, CategoryCounts};
use crate::utils::format::format_g;

/// Columns computed from the counts, in output order
pub const COMPUTED_COLUMNS: [&str; 7] = [
    "TP",
    "FP",
    "Sensitivity",
    "1-Specificity",
    "Precision",
    "F1",
    "F2",
];

/// Header line (without newline): `Threshold`, sorted category labels,
/// then the computed columns
#[must_use]
pub fn header() -> String {
    let mut columns = vec!["Threshold"];
    columns.extend(Category::sorted_labels());
    columns.extend(COMPUTED_COLUMNS);
    columns.join("\t")
}

/// Significant digits for every non-integer cell
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Not-a-number cells are written empty
fn format_ratio(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format_g(value, SIGNIFICANT_DIGITS)
    }
}

fn format_row(row: &PrecisionRecallRow) -> String {
    let counts = CategoryCounts::new(row.ref_count, row.contam_count);
    let mut fields = vec![format_g(row.threshold, SIGNIFICANT_DIGITS)];
    for label in Category::sorted_labels() {
        if let Some(category) = Category::parse(label) {
            fields.push(counts.get(category).to_string());
        }
    }
    fields.push(row.true_positive.to_string());
    fields.push(row.false_positive.to_string());
    for ratio in [
        row.sensitivity,
        row.fallout,
        row.precision,
        row.f1,
        row.f2,
    ] {
        fields.push(format_ratio(ratio));
    }
    fields.join("\t")
}

/// Write the table, one row per threshold
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_table<W: Write>(rows: &[PrecisionRecallRow], mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", header())?;
    for row in rows {
        writeln!(writer, "{}", format_row(row))?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::stats::build_table;
    use crate::core::counts::ThresholdCounts;

    #[test]
    fn test_header() {
        assert_eq!(
            header(),
            "Threshold\tCONTAM\tREF\tTP\tFP\tSensitivity\t1-Specificity\tPrecision\tF1\tF2"
        );
    }

    #[test]
    fn test_write_table() {
        let counts: ThresholdCounts = [
            (-2.5, CategoryCounts::new(4, 0)),
            (10.0, CategoryCounts::new(0, 0)),
        ]
        .into_iter()
        .collect();
        let rows = build_table(&counts);

        let mut out = Vec::new();
        write_table(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        // No contaminant reads: sensitivity and the F scores are undefined
        assert_eq!(lines[1], "-2.5\t0\t4\t0\t4\t\t1\t0\t\t");
        assert_eq!(lines[2], "10\t0\t0\t0\t0\t\t0\t\t\t");
    }

    #[test]
    fn test_ratios_share_threshold_format() {
        let counts: ThresholdCounts = [
            (0.0, CategoryCounts::new(10, 5)),
            (1.0, CategoryCounts::new(2, 8)),
        ]
        .into_iter()
        .collect();
        let rows = build_table(&counts);

        let mut out = Vec::new();
        write_table(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "0\t5\t10\t13\t12\t1\t1\t0.52\t0.684211\t0.844156");
        assert_eq!(
            lines[2],
            "1\t8\t2\t8\t2\t0.615385\t0.166667\t0.8\t0.695652\t0.645161"
        );
    }
}
