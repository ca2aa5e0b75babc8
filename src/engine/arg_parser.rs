use clap::Parser;
use std::path::PathBuf;

use crate::{StructurePolicy, UnbalancedPolicy};

/// Tabulate keywords in a survex source tree.
#[derive(Clone, Debug, Parser)]
#[command(name = "svxkw")]
#[command(
    about = "Walk a survex file and its *include tree; list keywords with file, line and survey path."
)]
pub struct Cli {
    /// Top-level survex file. `.svx` is appended when missing.
    #[arg(value_name = "SVX_FILE")]
    pub svx_file: PathBuf,

    /// Report which files are visited (and enable debug logging).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// What to do with empty or mismatched BEGIN/END statements.
    #[arg(long, value_enum)]
    pub structure: Option<StructurePolicy>,

    /// What to do when BEGIN blocks are still open at the end of the top-level file.
    #[arg(long, value_enum)]
    pub unbalanced: Option<UnbalancedPolicy>,

    /// Record absolute paths instead of relative ones.
    #[arg(long, short = 'd', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub directories: Option<bool>,

    /// Keywords to use instead of the default (comma-separated, case-insensitive).
    #[arg(long, short = 'k', value_name = "LIST")]
    pub keywords: Option<String>,

    /// Keywords to add to the default.
    #[arg(long, short = 'a', value_name = "LIST")]
    pub additional_keywords: Option<String>,

    /// Keywords to remove from the default.
    #[arg(long, short = 'e', value_name = "LIST")]
    pub excluded_keywords: Option<String>,

    /// Only recognise directives written in upper case, exactly as listed.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub case_sensitive: Option<bool>,

    /// Print totals for each keyword.
    #[arg(long, short = 't')]
    pub totals: bool,

    /// Print a one-line summary.
    #[arg(long, short = 's')]
    pub summarize: bool,

    /// Pattern to match (switches to grep mode).
    #[arg(long, short = 'g', value_name = "PATTERN")]
    pub grep: Option<String>,

    /// Ignore case in grep mode.
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Include the survey path when printing to the terminal.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub paths: Option<bool>,

    /// Colorize printed results.
    #[arg(long, short = 'c', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub color: Option<bool>,

    /// Only print warnings and errors (with -o).
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Write the table to a spreadsheet (.xlsx or .ods).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Resolve an optional flag (CLI or settings file) to a bool.
pub fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}
