use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{load_config, resolve_path, OutputFormat, TargetArgs};
use crate::export::write_records;
use crate::pipeline::{self, PipelineOutput};

#[derive(Args)]
pub struct RunArgs {
    /// Scope-and-sequence workbook scanned for module rows
    pub reference: Option<PathBuf>,

    /// Workbook holding the code/description table
    pub descriptions: Option<PathBuf>,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Sheet of the descriptions workbook to read (defaults to the grade label)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Directory to write extracted, description and joined tables to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Execute run subcommand
///
/// # Errors
///
/// Returns an error if any pipeline stage fails or the tables cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: RunArgs,
    format: OutputFormat,
    verbose: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    args.target.apply(&mut config);
    if let Some(sheet) = &args.sheet {
        config.description_sheet = Some(sheet.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }

    let reference = resolve_path(
        args.reference.as_ref(),
        config.reference.as_ref(),
        "reference workbook",
    )?;
    let descriptions = resolve_path(
        args.descriptions.as_ref(),
        config.descriptions.as_ref(),
        "descriptions workbook",
    )?;

    let output = pipeline::run(&reference, &descriptions, &config)?;

    if let Some(dir) = &config.output_dir {
        let paths = output.write_tables(dir)?;
        if verbose {
            eprintln!("Wrote {}", paths.extracted.display());
            eprintln!("Wrote {}", paths.descriptions.display());
            eprintln!("Wrote {}", paths.joined.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_results(&output, verbose),
        OutputFormat::Json => print_json_results(&output)?,
        OutputFormat::Tsv => write_records(std::io::stdout().lock(), &output.joined.records, b'\t')?,
    }

    Ok(())
}

fn print_text_results(output: &PipelineOutput, verbose: bool) {
    let summary = output.summary();

    println!("Standards for {}", summary.target);
    println!("{}", "=".repeat(60));
    println!("  Matched rows: {}", summary.matched_rows);
    println!("  Descriptions loaded: {}", summary.descriptions);
    println!("  Joined records: {}", summary.joined_records);
    println!("  Distinct codes: {}", summary.distinct_codes);
    if summary.missing_descriptions > 0 {
        println!("  Codes without description: {}", summary.missing_descriptions);
    }
    if summary.fallback {
        println!("  Mode: fallback (no codes found)");
    }

    println!("\nCandidates:");
    for candidate in output.joined.candidates() {
        println!("  {:<16} {}", candidate.code.as_str(), candidate.description);
    }

    if verbose {
        println!("\nRecords:");
        for record in &output.joined {
            let code = record.code.as_ref().map_or("-", |c| c.as_str());
            println!("  [{}] {:<16} {}", record.sheet, code, record.context_row);
        }
    }
}

fn print_json_results(output: &PipelineOutput) -> anyhow::Result<()> {
    let json = serde_json::json!({
        "summary": output.summary(),
        "candidates": output.joined.candidates(),
        "records": output.joined.records,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
