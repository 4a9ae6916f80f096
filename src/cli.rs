use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::model::WorkItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "testcase-params")]
#[command(about = "Resolve a test case work item into parameter rows for data-driven tests", long_about = None)]
pub struct Args {
    /// Id of the test case work item to resolve
    #[arg(long, value_name = "ID")]
    pub work_item: WorkItemId,

    /// Records file (JSON or YAML) holding the work items to resolve against
    #[arg(long, value_name = "FILE")]
    pub records: PathBuf,

    /// Test method name used in row display labels
    #[arg(short, long, value_name = "NAME", default_value = "test")]
    pub method: String,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        validate_records_path(&self.records)?;
        if self.method.trim().is_empty() {
            anyhow::bail!("Method name must not be empty");
        }
        Ok(())
    }
}

pub fn validate_records_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Records file does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else {
        anyhow::bail!("Records path is not a file: {}", path.display());
    }

    Ok(())
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}
