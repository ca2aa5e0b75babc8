//! svxkw CLI: list, count or export keywords of a survex tree; -g switches to grep mode.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;
use svxkw::engine::arg_parser::Cli;
use svxkw::engine::handle_run;
use svxkw::utils::PackagePaths;

fn main() -> Result<ExitCode> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let code = handle_run(&cli)?;
    log::debug!(
        "{} total time: {:?}",
        PackagePaths::get().pkg_name(),
        start_time.elapsed()
    );
    Ok(code)
}
