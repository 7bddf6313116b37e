use std::io::{self, Read};

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::codes::extract_codes;

#[derive(Args)]
pub struct CodesArgs {
    /// Text to scan; use '-' or omit to read stdin
    pub text: Option<String>,
}

/// Execute codes subcommand
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CodesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = match args.text.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let codes = extract_codes(&text);
    if verbose {
        eprintln!("Found {} code(s) in {} characters", codes.len(), text.chars().count());
    }

    match format {
        OutputFormat::Text | OutputFormat::Tsv => {
            for code in &codes {
                println!("{code}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&codes)?),
    }

    Ok(())
}
