//! Score command - score read alignments and tally reads per threshold.
//!
//! Reads simulated from the reference and from contaminants are aligned
//! separately and passed as `--ref-reads` and `--contam-reads`. Every
//! primary mapped alignment is scored; its score is the read's threshold.
//! The resulting counts table feeds the `stats` command.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::core::counts::{Category, ThresholdCounts};
use crate::logging::Logger;
use crate::parsing::counts::write_counts;
use crate::parsing::fai::{load_reference_contigs, ReferenceContigs};
use crate::parsing::sam::read_records;
use crate::scoring::read::ReadScore;
use crate::scoring::scorer::CigarScorer;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// SAM/BAM file(s) of reads drawn from the reference genome
    #[arg(long, required = true, num_args = 1..)]
    pub ref_reads: Vec<PathBuf>,

    /// SAM/BAM file(s) of reads drawn from contaminant genomes
    #[arg(long, required = true, num_args = 1..)]
    pub contam_reads: Vec<PathBuf>,

    /// Reference FASTA (with .fai alongside) or the .fai itself.
    /// Alignments to contigs not in the index are skipped.
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Write the threshold-count table here instead of stdout
    #[arg(long)]
    pub counts: Option<PathBuf>,

    /// Also write per-read scores as TSV
    #[arg(long)]
    pub per_read: Option<PathBuf>,
}

/// Per-input tallies for logging
#[derive(Debug, Default)]
struct InputSummary {
    scored: u64,
    not_primary: u64,
    off_reference: u64,
}

const PER_READ_HEADER: &str = "read\tcategory\tcontig\tscore\tleading_soft_clip\ttrailing_soft_clip\taligned_reference_length\tmismatches";

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the reference index is missing or malformed, an
/// input cannot be read, or a record cannot be decoded.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    // Reference problems are fatal before any scoring begins
    let reference = args
        .reference
        .as_deref()
        .map(load_reference_contigs)
        .transpose()?;
    if let Some(contigs) = &reference {
        info!(contigs = contigs.len(), "Loaded reference index");
    }

    let mut per_read = match &args.per_read {
        Some(path) => {
            let mut w = BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            );
            writeln!(w, "{PER_READ_HEADER}")?;
            Some(w)
        }
        None => None,
    };

    let mut scorer = CigarScorer::new();
    let mut counts = ThresholdCounts::new();
    let mut warned_contigs = HashSet::new();

    let inputs = args
        .ref_reads
        .iter()
        .map(|p| (Category::Ref, p))
        .chain(args.contam_reads.iter().map(|p| (Category::Contam, p)));

    for (category, path) in inputs {
        let summary = score_input(
            path,
            category,
            reference.as_ref(),
            &mut scorer,
            &mut counts,
            &mut warned_contigs,
            per_read.as_mut(),
        )?;
        info!(
            input = %path.display(),
            category = %category,
            scored = summary.scored,
            not_primary = summary.not_primary,
            off_reference = summary.off_reference,
            "Scored alignments"
        );
    }

    if let Some(w) = per_read.as_mut() {
        w.flush()?;
    }

    let writer: Box<dyn Write> = match &args.counts {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Json => write_counts_json(&counts, writer)?,
        OutputFormat::Text | OutputFormat::Tsv => write_counts(&counts, writer)?,
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn score_input<L: Logger, W: Write>(
    path: &Path,
    category: Category,
    reference: Option<&ReferenceContigs>,
    scorer: &mut CigarScorer<L>,
    counts: &mut ThresholdCounts,
    warned_contigs: &mut HashSet<String>,
    mut per_read: Option<&mut W>,
) -> anyhow::Result<InputSummary> {
    let mut summary = InputSummary::default();
    let records =
        read_records(path).with_context(|| format!("Failed to open {}", path.display()))?;

    for record in records {
        let record = record.with_context(|| format!("Failed to read {}", path.display()))?;

        if !record.is_primary_mapped() {
            summary.not_primary += 1;
            continue;
        }

        // Primary mapped records always carry a contig
        let contig = record.contig.as_deref().unwrap_or_default();

        if let Some(contigs) = reference {
            if !contigs.contains(contig) {
                if warned_contigs.insert(contig.to_string()) {
                    warn!(contig, "Contig not found in reference index, skipping its alignments");
                }
                summary.off_reference += 1;
                continue;
            }
        }

        let read = ReadScore::from_cigar(scorer, &record.cigar, record.md.as_deref());

        counts.record(score_to_threshold(read.score), category);
        summary.scored += 1;

        if let Some(w) = per_read.as_deref_mut() {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                record.name,
                category,
                contig,
                read.score,
                read.leading_soft_clip,
                read.trailing_soft_clip,
                read.aligned_reference_length,
                read.mismatches.map(|m| m.to_string()).unwrap_or_default()
            )?;
        }
    }

    Ok(summary)
}

#[inline]
fn score_to_threshold(score: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        score as f64
    }
}

fn write_counts_json<W: Write>(counts: &ThresholdCounts, mut writer: W) -> anyhow::Result<()> {
    let rows: Vec<serde_json::Value> = counts
        .iter()
        .map(|(threshold, c)| {
            serde_json::json!({
                "threshold": threshold,
                "ref_count": c.ref_count,
                "contam_count": c.contam_count,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
