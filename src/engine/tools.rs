//! Path and line utilities

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{SvxError, SvxResult};
use crate::utils::config::{SVX_EXTENSION, TAB_SIZE};

/// Append `.svx` unless the path already carries that extension (any case).
pub fn with_svx_suffix(path: &Path) -> PathBuf {
    let has_svx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SVX_EXTENSION));
    if has_svx {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(SVX_EXTENSION);
    PathBuf::from(name)
}

/// Resolve the argument of an INCLUDE relative to the directory of the including file.
/// Surrounding quotes are dropped and backslashes become forward slashes.
pub fn resolve_include(including: &Path, argument: &str) -> PathBuf {
    let name = argument.trim().trim_matches('"').replace('\\', "/");
    let parent = including.parent().unwrap_or(Path::new(""));
    with_svx_suffix(&parent.join(name))
}

/// Make `path` absolute against the current directory without touching the filesystem.
pub fn absolutize(path: &Path) -> SvxResult<PathBuf> {
    std::path::absolute(path).map_err(|e| SvxError::io(path, e))
}

/// Drop everything from the first comment marker on, then trim.
pub fn strip_comment(line: &str, comment: char) -> &str {
    match line.find(comment) {
        Some(at) => line[..at].trim(),
        None => line,
    }
}

/// Replace tabs with spaces up to the next multiple of [`TAB_SIZE`].
pub fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_SIZE);
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_added_when_absent() {
        assert_eq!(with_svx_suffix(Path::new("cave")), PathBuf::from("cave.svx"));
        assert_eq!(
            with_svx_suffix(Path::new("dir/cave.2023")),
            PathBuf::from("dir/cave.2023.svx")
        );
    }

    #[test]
    fn suffix_kept_when_present() {
        assert_eq!(with_svx_suffix(Path::new("cave.svx")), PathBuf::from("cave.svx"));
        assert_eq!(with_svx_suffix(Path::new("CAVE.SVX")), PathBuf::from("CAVE.SVX"));
    }

    #[test]
    fn include_resolves_against_including_dir() {
        assert_eq!(
            resolve_include(Path::new("top/sub/a.svx"), "\"..\\other\\b\""),
            PathBuf::from("top/sub/../other/b.svx")
        );
        assert_eq!(resolve_include(Path::new("a.svx"), "b"), PathBuf::from("b.svx"));
    }

    #[test]
    fn comments_are_stripped() {
        assert_eq!(strip_comment("*fix P1 ; surveyed 1990", ';'), "*fix P1");
        assert_eq!(strip_comment("; only a comment", ';'), "");
        assert_eq!(strip_comment("*fix P1", ';'), "*fix P1");
    }

    #[test]
    fn tabs_expand_to_tab_stops() {
        assert_eq!(expand_tabs("*fix\tP1"), "*fix    P1");
        assert_eq!(expand_tabs("a\tb\tc"), "a       b       c");
        assert_eq!(expand_tabs("no tabs"), "no tabs");
    }
}
