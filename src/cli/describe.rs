use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::store::DescriptionIndex;
use crate::cli::{load_config, resolve_path, OutputFormat};
use crate::export::write_records;

#[derive(Args)]
pub struct DescribeArgs {
    /// Workbook holding the code/description table
    pub input: Option<PathBuf>,

    /// Sheet to read (defaults to the grade label, e.g. "Grade 8")
    #[arg(long)]
    pub sheet: Option<String>,

    /// Grade label, used as the sheet name when --sheet is not given
    #[arg(long)]
    pub grade: Option<String>,
}

/// Execute describe subcommand
///
/// # Errors
///
/// Returns an error if the sheet or its code/description columns cannot be found.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(
    args: DescribeArgs,
    format: OutputFormat,
    verbose: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if let Some(grade) = &args.grade {
        config.target.grade.clone_from(grade);
    }
    if let Some(sheet) = &args.sheet {
        config.description_sheet = Some(sheet.clone());
    }
    config.validate()?;

    let input = resolve_path(
        args.input.as_ref(),
        config.descriptions.as_ref(),
        "descriptions workbook",
    )?;
    let sheet = config.description_sheet();

    let index = DescriptionIndex::load(&input, sheet)?;
    if verbose {
        eprintln!("Loaded {} descriptions from sheet '{sheet}'", index.len());
    }

    match format {
        OutputFormat::Text => {
            println!("Standard descriptions ({sheet})");
            println!("{}", "=".repeat(60));
            for entry in index.entries() {
                println!("{:<16} {}", entry.code.as_str(), entry.description);
            }
            println!("\n{} standard(s)", index.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(index.entries())?),
        OutputFormat::Tsv => write_records(std::io::stdout().lock(), index.entries(), b'\t')?,
    }

    Ok(())
}
