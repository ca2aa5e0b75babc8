//! Keyword table: records in walk order plus what the walk saw on the way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::DirectiveRecord;
use crate::pipeline::Anomaly;

/// Column titles, in record field order.
pub const COLUMNS: [&str; 7] = ["file", "encoding", "line", "keyword", "argument", "path", "full"];

/// Accumulated result of one walk. Records are kept exactly as produced.
#[derive(Clone, Debug, Default)]
pub struct KeywordTable {
    top_level: PathBuf,
    records: Vec<DirectiveRecord>,
    files_visited: usize,
    anomalies: Vec<Anomaly>,
}

impl KeywordTable {
    pub fn new(
        top_level: PathBuf,
        records: Vec<DirectiveRecord>,
        files_visited: usize,
        anomalies: Vec<Anomaly>,
    ) -> Self {
        Self {
            top_level,
            records,
            files_visited,
            anomalies,
        }
    }

    /// Top-level file the walk started from.
    pub fn top_level(&self) -> &Path {
        &self.top_level
    }

    pub fn records(&self) -> &[DirectiveRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DirectiveRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn files_visited(&self) -> usize {
        self.files_visited
    }

    /// BEGIN/END/INCLUDE irregularities seen (and tolerated) during the walk.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Count per keyword, most frequent first; ties by name.
    pub fn totals(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.keyword.as_str()).or_default() += 1;
        }
        let mut totals: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(keyword, n)| (keyword.to_string(), n))
            .collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        totals
    }
}

impl<'a> IntoIterator for &'a KeywordTable {
    type Item = &'a DirectiveRecord;
    type IntoIter = std::slice::Iter<'a, DirectiveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
