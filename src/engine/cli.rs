//! CLI command handler: walk the tree, then print lines, totals, a summary, or write a spreadsheet.

use anyhow::Result;
use log::{debug, warn};
use regex::RegexBuilder;
use std::path::Path;
use std::process::ExitCode;

use crate::engine::arg_parser::{Cli, flag};
use crate::engine::tools::with_svx_suffix;
use crate::export::write_spreadsheet;
use crate::report::{LineFormat, Style, render_lines, render_summary, render_totals};
use crate::utils::setup_logging;
use crate::utils::svxkw_toml::{apply_file_to_cli, load_svxkw_toml};
use crate::{KeywordSet, KeywordTable, Opts, SvxError, analyze};

/// Reporting set from `-k` (replace), then `-a` (add), then `-e` (remove).
pub fn keyword_set_from_cli(cli: &Cli) -> KeywordSet {
    let mut keywords = match cli.keywords.as_deref() {
        Some(list) => KeywordSet::parse_list(list),
        None => KeywordSet::defaults(),
    };
    if let Some(list) = cli.additional_keywords.as_deref() {
        keywords = keywords.union(&KeywordSet::parse_list(list));
    }
    if let Some(list) = cli.excluded_keywords.as_deref() {
        keywords = keywords.difference(&KeywordSet::parse_list(list));
    }
    keywords
}

/// Build walker options from the (file-merged) command line.
pub fn setup_opts(cli: &Cli) -> Result<Opts> {
    let pattern = cli
        .grep
        .as_deref()
        .map(|p| RegexBuilder::new(p).case_insensitive(cli.ignore_case).build())
        .transpose()
        .map_err(SvxError::from)?;
    let keywords = if pattern.is_some() {
        KeywordSet::default()
    } else {
        keyword_set_from_cli(cli)
    };
    Ok(Opts {
        keywords,
        pattern,
        trace: flag(cli.verbose),
        absolute_paths: flag(cli.directories),
        preserve_case: cli.output.is_none() && !cli.totals && !cli.summarize,
        case_sensitive: flag(cli.case_sensitive),
        structure: cli.structure.unwrap_or_default(),
        unbalanced: cli.unbalanced.unwrap_or_default(),
        ..Opts::default()
    })
}

/// Run the walk and print the requested view. Exit code 1 when grep mode finds nothing.
pub fn handle_run(cli: &Cli) -> Result<ExitCode> {
    setup_logging(flag(cli.verbose), cli.quiet);
    let mut cli = cli.clone();
    let top_level = with_svx_suffix(&cli.svx_file);
    let dir = top_level
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if let Some(file) = load_svxkw_toml(dir) {
        debug!("Loaded settings from {}", dir.display());
        apply_file_to_cli(&file, &mut cli);
    }

    let opts = setup_opts(&cli)?;
    let table = analyze(&cli.svx_file, &opts)?;
    present(&cli, &opts, &table)
}

fn present(cli: &Cli, opts: &Opts, table: &KeywordTable) -> Result<ExitCode> {
    let grep_mode = opts.grep_mode();
    if grep_mode && (cli.totals || cli.summarize || cli.output.is_some()) {
        warn!("Grep mode: ignoring --totals, --summarize and --output");
    }
    let totals = cli.totals && !grep_mode;
    let summarize = cli.summarize && !grep_mode;
    let output = cli.output.as_deref().filter(|_| !grep_mode);
    let style = Style::from_flag(flag(cli.color));

    if table.is_empty() {
        if grep_mode {
            return Ok(ExitCode::from(1));
        }
        if !cli.quiet {
            println!("{}", render_summary(table, &opts.keywords, style, None));
        }
        return Ok(ExitCode::SUCCESS);
    }

    if totals {
        for line in render_totals(table, style) {
            println!("{}", line);
        }
    }
    if summarize && output.is_none() {
        println!("{}", render_summary(table, &opts.keywords, style, None));
    }
    match output {
        Some(path) => {
            write_spreadsheet(table, path)?;
            if !cli.quiet || summarize {
                let extra = format!(" > {}", path.display());
                println!(
                    "{}",
                    render_summary(table, &opts.keywords, style, Some(&extra))
                );
            }
        }
        None if !totals && !summarize => {
            let format = LineFormat {
                style,
                show_context: flag(cli.paths),
                grep_mode,
                marker: opts.markers.directive,
            };
            for line in render_lines(table, &format) {
                println!("{}", line);
            }
        }
        None => {}
    }
    Ok(ExitCode::SUCCESS)
}
