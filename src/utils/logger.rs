//! Terminal logger: `[svxkw] msg` for progress, `[svxkw WARN target] msg` for problems.

use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter, Record};
use std::io::Write;

use crate::utils::config::PackagePaths;

/// Crate log level for the run: `--verbose` shows file entry and debug detail,
/// `--quiet` keeps only structural warnings and errors.
fn crate_level(verbose: bool, quiet: bool) -> LevelFilter {
    match (verbose, quiet) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Warn,
        (false, false) => LevelFilter::Info,
    }
}

fn level_label(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        _ => None,
    }
}

fn format_line(record: &Record<'_>) -> String {
    let name = PackagePaths::get().pkg_name().cyan();
    match level_label(record.level()) {
        Some(label) => format!(
            "[{} {} {}] {}",
            name,
            label,
            record.target().white(),
            record.args()
        ),
        None => format!("[{}] {}", name, record.args()),
    }
}

pub fn setup_logging(verbose: bool, quiet: bool) {
    // Dependencies stay at Warn; RUST_LOG still overrides.
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(PackagePaths::get().pkg_name(), crate_level(verbose, quiet))
        .format(|buf, record| writeln!(buf, "{}", format_line(record)))
        .try_init();
}
