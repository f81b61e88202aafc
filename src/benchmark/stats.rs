//! Cumulative precision/recall statistics over per-threshold read counts.
//!
//! Contaminant reads are the positive class. A read assigned threshold `t`
//! is called positive at every threshold `T <= t`, so true and false
//! positives at `T` are the contaminant and reference counts summed over all
//! thresholds `>= T`.

use serde::Serialize;

use crate::core::counts::ThresholdCounts;
use crate::logging::Logger;
use crate::utils::format::format_g;

/// One row of the precision/recall table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionRecallRow {
    pub threshold: f64,
    pub ref_count: u64,
    pub contam_count: u64,
    pub true_positive: u64,
    pub false_positive: u64,
    /// Recall: true positives over all contaminant reads
    pub sensitivity: f64,
    /// False positives over all reference reads (1 - specificity)
    pub fallout: f64,
    pub precision: f64,
    pub f1: f64,
    pub f2: f64,
}

#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// F-beta score; `beta = 1.0` gives F1.
///
/// Zero precision and recall yield not-a-number.
#[must_use]
pub fn f_beta(precision: f64, recall: f64, beta: f64) -> f64 {
    let beta2 = beta * beta;
    (1.0 + beta2) * precision * recall / (beta2 * precision + recall)
}

/// Build the cumulative table, one row per threshold in ascending order.
///
/// Ratios with a zero denominator are left as not-a-number. Cumulative
/// counts saturate at `u64::MAX`.
#[must_use]
pub fn build_table(counts: &ThresholdCounts) -> Vec<PrecisionRecallRow> {
    let totals = counts.totals();
    let total_ref = count_to_f64(totals.ref_count);
    let total_contam = count_to_f64(totals.contam_count);

    let mut rows = Vec::with_capacity(counts.len());
    let mut tr: u64 = 0;
    let mut tc: u64 = 0;

    for (threshold, c) in counts.iter().rev() {
        tr = tr.saturating_add(c.ref_count);
        tc = tc.saturating_add(c.contam_count);

        let sensitivity = count_to_f64(tc) / total_contam;
        let precision = count_to_f64(tc) / count_to_f64(tc.saturating_add(tr));

        rows.push(PrecisionRecallRow {
            threshold,
            ref_count: c.ref_count,
            contam_count: c.contam_count,
            true_positive: tc,
            false_positive: tr,
            sensitivity,
            fallout: count_to_f64(tr) / total_ref,
            precision,
            f1: f_beta(precision, sensitivity, 1.0),
            f2: f_beta(precision, sensitivity, 2.0),
        });
    }

    rows.reverse();
    rows
}

/// Area under the precision/recall curve as a step sum.
///
/// Rows are visited from the highest threshold down (ascending
/// sensitivity). The first step width is that row's sensitivity itself,
/// each later one the difference from the previously visited row.
/// Not-a-number precision counts as zero here only. The result is logged
/// as `Average Precision = <value>`.
pub fn average_precision<L: Logger>(rows: &[PrecisionRecallRow], logger: &L) -> f64 {
    let mut total = 0.0;
    let mut previous: Option<f64> = None;

    for row in rows.iter().rev() {
        let delta = match previous {
            Some(p) => row.sensitivity - p,
            None => row.sensitivity,
        };
        let precision = if row.precision.is_nan() {
            0.0
        } else {
            row.precision
        };
        total += precision * delta;
        previous = Some(row.sensitivity);
    }

    logger.info(&format!("Average Precision = {}", format_g(total, 6)));
    total
}

/// Log precision and recall for every row
pub fn report<L: Logger>(rows: &[PrecisionRecallRow], logger: &L) {
    for row in rows {
        logger.info(&format!(
            "At threshold={} precision={} recall={}",
            format_g(row.threshold, 6),
            format_g(row.precision, 3),
            format_g(row.sensitivity, 3),
        ));
    }
}
