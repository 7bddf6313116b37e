use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_config, resolve_path, OutputFormat, TargetArgs};
use crate::core::row::MatchedRow;
use crate::core::types::TargetTriple;
use crate::export::write_records;
use crate::matching::rows::RowMatcher;
use crate::parsing::workbook::load_source;

#[derive(Args)]
pub struct ExtractArgs {
    /// Scope-and-sequence workbook (xlsx, xls, ods, csv or tsv)
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub target: TargetArgs,
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if the workbook cannot be loaded or no rows match.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: ExtractArgs,
    format: OutputFormat,
    verbose: bool,
    config: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    args.target.apply(&mut config);
    config.validate()?;

    let input = resolve_path(args.input.as_ref(), config.reference.as_ref(), "reference workbook")?;
    let matcher = RowMatcher::new(&config.target)?;

    let workbook = load_source(&input)?;
    if verbose {
        eprintln!(
            "Loaded {} sheets ({} rows) from {}",
            workbook.len(),
            workbook.row_count(),
            input.display()
        );
    }

    let rows = matcher.extract(&workbook)?;

    match format {
        OutputFormat::Text => print_text_rows(&rows, &config.target),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Tsv => write_records(std::io::stdout().lock(), &rows, b'\t')?,
    }

    Ok(())
}

fn print_text_rows(rows: &[MatchedRow], target: &TargetTriple) {
    println!("Rows for {target}");
    println!("{}", "=".repeat(60));

    for (i, row) in rows.iter().enumerate() {
        println!("\n#{} {} (row {})", i + 1, row.source_sheet, row.row_index);
        if !row.context_above.is_empty() {
            println!("   Above: {}", row.context_above);
        }
        println!("   Row:   {}", row.context_row);
    }

    println!("\n{} matching row(s)", rows.len());
}
