//! Terminal rendering of a keyword table: per-record lines, totals and the summary line.

use colored::Colorize;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::table::KeywordTable;
use crate::{DirectiveRecord, KeywordSet};

/// `<path>:<line>:` at the start of a rendered line.
static RE_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):(\d+):").expect("location regex"));

/// Plain text or ANSI-coloured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Plain,
    Color,
}

impl Style {
    pub fn from_flag(color: bool) -> Self {
        if color { Style::Color } else { Style::Plain }
    }
}

/// Options for [`render_lines`].
#[derive(Clone, Copy, Debug)]
pub struct LineFormat {
    pub style: Style,
    /// Add the survey path column.
    pub show_context: bool,
    /// Highlight only the matched text instead of marker and keyword.
    pub grep_mode: bool,
    pub marker: char,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            style: Style::Plain,
            show_context: false,
            grep_mode: false,
            marker: '*',
        }
    }
}

/// `<file>:<line>:[<path>:]<full>`, one per record.
pub fn render_lines(table: &KeywordTable, format: &LineFormat) -> Vec<String> {
    table.iter().map(|r| render_record(r, format)).collect()
}

pub fn render_record(record: &DirectiveRecord, format: &LineFormat) -> String {
    let file = record.file.display().to_string();
    match format.style {
        Style::Plain if format.show_context => {
            format!("{}:{}:{}:{}", file, record.line, record.path, record.full)
        }
        Style::Plain => format!("{}:{}:{}", file, record.line, record.full),
        Style::Color => {
            let full = highlight(record, format);
            let sep = ":".cyan();
            if format.show_context {
                format!(
                    "{}{sep}{}{sep}{}{sep}{}",
                    file.purple(),
                    record.line.to_string().green(),
                    record.path.blue(),
                    full
                )
            } else {
                format!(
                    "{}{sep}{}{sep}{}",
                    file.purple(),
                    record.line.to_string().green(),
                    full
                )
            }
        }
    }
}

/// Colour the keyword (with its marker) or the grep match inside the full line.
fn highlight(record: &DirectiveRecord, format: &LineFormat) -> String {
    let full = record.full.as_str();
    let keyword = record.keyword.as_str();
    let Some(at) = full.find(keyword).filter(|_| !keyword.is_empty()) else {
        // Upper-cased keywords need not appear verbatim; colour the marker alone.
        return match full.strip_prefix(format.marker) {
            Some(rest) if !format.grep_mode => {
                format!("{}{}", format.marker.to_string().red(), rest)
            }
            _ => full.to_string(),
        };
    };
    let end = at + keyword.len();
    let start = if format.grep_mode {
        at
    } else {
        full[..at].rfind(format.marker).unwrap_or(at)
    };
    format!("{}{}{}", &full[..start], full[start..end].red(), &full[end..])
}

/// `<top>:<KEYWORD>:<count>` for every keyword in the table.
pub fn render_totals(table: &KeywordTable, style: Style) -> Vec<String> {
    let top = table.top_level().display().to_string();
    table
        .totals()
        .into_iter()
        .map(|(keyword, total)| match style {
            Style::Plain => format!("{}:{}:{}", top, keyword, total),
            Style::Color => {
                let sep = ":".cyan();
                format!("{}{sep}{}{sep}{}", top.purple(), keyword.red(), total)
            }
        })
        .collect()
}

/// `<top>:<K1|K2|..>: <N> records found (<M> files)` with an optional suffix such as ` > out.xlsx`.
pub fn render_summary(
    table: &KeywordTable,
    keywords: &KeywordSet,
    style: Style,
    extra: Option<&str>,
) -> String {
    let top = table.top_level().display().to_string();
    let found = format!(
        "{} records found ({} files)",
        table.len(),
        table.files_visited()
    );
    let extra = extra.unwrap_or_default();
    match style {
        Style::Plain => format!("{}:{}: {}{}", top, keywords.joined(), found, extra),
        Style::Color => format!(
            "{}{}{}{} {}{}",
            top.purple(),
            ":".cyan(),
            keywords.joined().red(),
            ":".cyan(),
            found,
            extra.yellow()
        ),
    }
}

/// Recover file and line number from a plain rendered line.
pub fn parse_location(line: &str) -> Option<(PathBuf, usize)> {
    let caps = RE_LOCATION.captures(line)?;
    let line_number = caps[2].parse().ok()?;
    Some((PathBuf::from(&caps[1]), line_number))
}
