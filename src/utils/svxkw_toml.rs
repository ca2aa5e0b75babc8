//! Load `.svxkw.toml` from the directory of the top-level file (CLI only). Lib callers build [`Opts`](crate::Opts) directly.

use serde::Deserialize;
use std::path::Path;

use crate::engine::arg_parser::Cli;
use crate::utils::config::PackagePaths;
use crate::{StructurePolicy, UnbalancedPolicy};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SvxkwToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    keywords: Option<Vec<String>>,
    additional_keywords: Option<Vec<String>>,
    excluded_keywords: Option<Vec<String>>,
    trace: Option<bool>,
    structure: Option<StructurePolicy>,
    unbalanced: Option<UnbalancedPolicy>,
    absolute_paths: Option<bool>,
    case_sensitive: Option<bool>,
    paths: Option<bool>,
    color: Option<bool>,
}

/// Load the settings file from `dir` if present. Returns None if missing or unreadable.
pub(crate) fn load_svxkw_toml(dir: &Path) -> Option<SvxkwToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Fill a CLI field from the file when the command line left it unset.
macro_rules! apply_file_opt {
    ($file:expr, $cli:expr, $file_field:ident => $cli_field:ident) => {
        if $cli.$cli_field.is_none() {
            $cli.$cli_field = $file.$file_field.clone();
        }
    };
}

/// Apply file settings underneath the command line: flags given on the command line win.
pub(crate) fn apply_file_to_cli(file: &SvxkwToml, cli: &mut Cli) {
    let s = &file.settings;
    let joined = |list: &Option<Vec<String>>| list.as_ref().map(|v| v.join(","));
    if cli.keywords.is_none() {
        cli.keywords = joined(&s.keywords);
    }
    if cli.additional_keywords.is_none() {
        cli.additional_keywords = joined(&s.additional_keywords);
    }
    if cli.excluded_keywords.is_none() {
        cli.excluded_keywords = joined(&s.excluded_keywords);
    }
    apply_file_opt!(s, cli, trace => verbose);
    apply_file_opt!(s, cli, structure => structure);
    apply_file_opt!(s, cli, unbalanced => unbalanced);
    apply_file_opt!(s, cli, absolute_paths => directories);
    apply_file_opt!(s, cli, case_sensitive => case_sensitive);
    apply_file_opt!(s, cli, paths => paths);
    apply_file_opt!(s, cli, color => color);
}
