//! Stats command - precision/recall table from threshold counts.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;

use crate::benchmark::stats::{average_precision, build_table, report, PrecisionRecallRow};
use crate::benchmark::table::write_table;
use crate::cli::OutputFormat;
use crate::logging::TracingLogger;
use crate::parsing::counts::parse_counts_file;

#[derive(Args)]
pub struct StatsArgs {
    /// Threshold-count table (Threshold, CONTAM, REF columns); '-' for stdin
    #[arg(required = true)]
    pub counts: PathBuf,

    /// Write the table here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the stats command
///
/// # Errors
///
/// Returns an error if the counts cannot be read or the table cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let counts = parse_counts_file(&args.counts)
        .with_context(|| format!("Failed to read counts from {}", args.counts.display()))?;
    debug!(thresholds = counts.len(), "Loaded threshold counts");

    let rows = build_table(&counts);
    let logger = TracingLogger;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    report(&rows, &logger);
    let ap = average_precision(&rows, &logger);

    match format {
        OutputFormat::Json => write_json(&rows, ap, writer)?,
        OutputFormat::Text | OutputFormat::Tsv => write_table(&rows, writer)?,
    }

    Ok(())
}

fn write_json<W: Write>(rows: &[PrecisionRecallRow], ap: f64, mut writer: W) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "rows": rows,
        "average_precision": ap,
    });
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
