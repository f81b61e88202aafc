//! Cigar command - score one alignment given on the command line.

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::cigar::{decode, Cigar};
use crate::scoring::read::ReadScore;
use crate::scoring::scorer::CigarScorer;

#[derive(Args)]
pub struct CigarArgs {
    /// CIGAR string, e.g. 5S90M2I3M
    #[arg(required = true)]
    pub cigar: String,

    /// MD tag value for mismatch counting, e.g. 40A52
    #[arg(long)]
    pub md: Option<String>,
}

/// Execute the cigar command
///
/// # Errors
///
/// Returns an error if the CIGAR string is malformed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CigarArgs, format: OutputFormat) -> anyhow::Result<()> {
    let cigar = decode(&args.cigar)?;
    let mut scorer = CigarScorer::new();
    let read = ReadScore::from_cigar(&mut scorer, &cigar, args.md.as_deref());

    match format {
        OutputFormat::Text => print_text(&cigar, &read),
        OutputFormat::Json => print_json(&args, &read)?,
        OutputFormat::Tsv => print_tsv(&read),
    }

    Ok(())
}

fn print_text(cigar: &Cigar, read: &ReadScore) {
    println!("CIGAR: {cigar}");
    println!("{}", "=".repeat(40));
    println!("   Operations: {}", cigar.len());
    println!("   Score: {}", read.score);
    println!(
        "   Soft clips: {} leading, {} trailing",
        read.leading_soft_clip, read.trailing_soft_clip
    );
    println!(
        "   Aligned reference length: {}",
        read.aligned_reference_length
    );
    if let Some(mismatches) = read.mismatches {
        println!("   Mismatches (MD): {mismatches}");
    }
}

fn print_json(args: &CigarArgs, read: &ReadScore) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "cigar": args.cigar,
        "md": args.md,
        "score": read,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(read: &ReadScore) {
    println!("score\tleading_soft_clip\ttrailing_soft_clip\taligned_reference_length\tmismatches");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        read.score,
        read.leading_soft_clip,
        read.trailing_soft_clip,
        read.aligned_reference_length,
        read.mismatches.map(|m| m.to_string()).unwrap_or_default()
    );
}
