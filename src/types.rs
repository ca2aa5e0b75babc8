//! Public and internal types for the svxkw API and walker.

use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Directives the walker always recognises, whatever the reporting set says.
pub const STRUCTURAL_KEYWORDS: [&str; 3] = ["INCLUDE", "BEGIN", "END"];

/// Reporting set used when the caller does not supply one.
pub const DEFAULT_KEYWORDS: [&str; 7] = ["INCLUDE", "BEGIN", "END", "FIX", "ENTRANCE", "EQUATE", "CS"];

/// Text encodings tried (in order) when opening a survex file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Latin1,
}

/// Default candidate order: UTF-8 first, then the single-byte fallback.
pub const DEFAULT_ENCODINGS: [Encoding; 2] = [Encoding::Utf8, Encoding::Latin1];

impl Encoding {
    /// Upper-case label as reported in the `encoding` column.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode `bytes`, or `None` when they are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            // Every byte is a code point of the same value.
            Encoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker characters of the survex syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Starts a directive line (`*begin`).
    pub directive: char,
    /// Starts a same-line comment.
    pub comment: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            directive: '*',
            comment: ';',
        }
    }
}

/// Upper-cased directive names. An entry may be two words (`CS OUT`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordSet {
    names: BTreeSet<String>,
}

impl KeywordSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Parse a comma-separated, case-insensitive list such as `fix,entrance,cs out`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Keywords reported when nothing is configured.
    pub fn defaults() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }

    /// Insert one name, normalised to upper case with single inner spaces. Blank names are ignored.
    pub fn insert(&mut self, name: &str) {
        let normalised = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        if !normalised.is_empty() {
            self.names.insert(normalised);
        }
    }

    pub fn union(&self, other: &KeywordSet) -> KeywordSet {
        KeywordSet {
            names: self.names.union(&other.names).cloned().collect(),
        }
    }

    pub fn difference(&self, other: &KeywordSet) -> KeywordSet {
        KeywordSet {
            names: self.names.difference(&other.names).cloned().collect(),
        }
    }

    /// This set plus INCLUDE, BEGIN and END.
    pub fn with_structural(&self) -> KeywordSet {
        self.union(&KeywordSet::new(STRUCTURAL_KEYWORDS))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Sorted, pipe-joined names as shown in the summary line.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join("|")
    }
}

/// What to do with an empty BEGIN/END or an END that does not match its BEGIN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructurePolicy {
    /// Log a warning and keep walking.
    #[default]
    Warn,
    /// Keep walking silently.
    Ignore,
    /// Abort the walk with [`SvxError::StructuralMismatch`](crate::SvxError::StructuralMismatch).
    Fail,
}

/// What to do when BEGIN blocks are still open once the top-level file ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnbalancedPolicy {
    Ignore,
    #[default]
    Warn,
    Fail,
}

/// One row of the keyword table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectiveRecord {
    /// File the line came from (relative unless absolute paths were requested).
    pub file: PathBuf,
    pub encoding: Encoding,
    /// 1-based, reset for every file.
    pub line: usize,
    /// Directive name (or the matched text in grep mode).
    pub keyword: String,
    /// Arguments joined by single spaces.
    pub argument: String,
    /// Dot-joined survey path from the enclosing BEGIN blocks.
    pub path: String,
    /// Stripped source line with tabs expanded.
    pub full: String,
}

/// Options for [`analyze`](crate::analyze) and [`Walker`](crate::pipeline::Walker).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Keywords that produce records. INCLUDE, BEGIN and END are recognised regardless.
    pub keywords: KeywordSet,
    /// Grep mode: report lines matching this pattern instead of keywords.
    pub pattern: Option<Regex>,
    /// Log each file as it is entered.
    pub trace: bool,
    /// Report absolute file paths.
    pub absolute_paths: bool,
    /// Keep the source casing of directive names in the `keyword` column.
    pub preserve_case: bool,
    /// Match directive names exactly against the (upper-case) keyword set.
    pub case_sensitive: bool,
    pub structure: StructurePolicy,
    pub unbalanced: UnbalancedPolicy,
    pub markers: Markers,
    /// Candidate encodings, tried in order.
    pub encodings: Vec<Encoding>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            keywords: KeywordSet::defaults(),
            pattern: None,
            trace: false,
            absolute_paths: false,
            preserve_case: false,
            case_sensitive: false,
            structure: StructurePolicy::default(),
            unbalanced: UnbalancedPolicy::default(),
            markers: Markers::default(),
            encodings: DEFAULT_ENCODINGS.to_vec(),
        }
    }
}

impl Opts {
    pub fn grep_mode(&self) -> bool {
        self.pattern.is_some()
    }
}
