//! Command-line interface for standards-align.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **extract**: Find scope-and-sequence rows for a grade/unit/module
//! - **codes**: Pull canonical standard codes out of free text
//! - **describe**: Load the code/description table for a grade
//! - **run**: Full pipeline, optionally writing the three tables to disk
//!
//! ## Usage
//!
//! ```text
//! # Rows for the default target (Grade 8 / Unit 1 / Module 2)
//! standards-align extract scope_and_sequence.xlsx
//!
//! # Another module, as JSON
//! standards-align extract scope_and_sequence.xlsx --module "Module 3" --format json
//!
//! # Normalize codes from text
//! echo "ccss.rl.8.1 and W.8.3a" | standards-align codes
//!
//! # Everything, writing CSV tables to ./output
//! standards-align run scope_and_sequence.xlsx ela_standards.xlsx --output-dir output
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::pipeline::PipelineConfig;

pub mod codes;
pub mod describe;
pub mod extract;
pub mod run;

#[derive(Parser)]
#[command(name = "standards-align")]
#[command(version)]
#[command(about = "Extract module standards from scope-and-sequence spreadsheets")]
#[command(
    long_about = "standards-align finds the scope-and-sequence rows for a grade, unit and module, extracts the standard codes they mention, and joins them with the standard descriptions for that grade.\n\nThe joined table is the input for aligning curriculum activities with standards."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// JSON configuration file (paths, target labels, output directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find rows matching the target grade, unit and module
    Extract(extract::ExtractArgs),

    /// Extract canonical standard codes from text
    Codes(codes::CodesArgs),

    /// Load standard descriptions for a grade
    Describe(describe::DescribeArgs),

    /// Run the full extract, describe and join pipeline
    Run(run::RunArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Target label overrides shared by subcommands that scan rows
#[derive(clap::Args, Debug, Default)]
pub struct TargetArgs {
    /// Grade label, e.g. "Grade 8"
    #[arg(long)]
    pub grade: Option<String>,

    /// Unit label, e.g. "Unit 1"
    #[arg(long)]
    pub unit: Option<String>,

    /// Module label, e.g. "Module 2"
    #[arg(long)]
    pub module: Option<String>,
}

impl TargetArgs {
    /// Override config labels with any given on the command line
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(grade) = &self.grade {
            config.target.grade.clone_from(grade);
        }
        if let Some(unit) = &self.unit {
            config.target.unit.clone_from(unit);
        }
        if let Some(module) = &self.module {
            config.target.module.clone_from(module);
        }
    }
}

/// Load the config file if one was given, otherwise defaults
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => Ok(PipelineConfig::load(path)?),
        None => Ok(PipelineConfig::default()),
    }
}

/// Pick the CLI value, else the config value, else fail naming the argument
pub(crate) fn resolve_path(
    cli: Option<&PathBuf>,
    config: Option<&PathBuf>,
    what: &str,
) -> anyhow::Result<PathBuf> {
    cli.or(config)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no {what} given on the command line or in --config"))
}
