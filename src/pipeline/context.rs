//! Survey-path nesting from BEGIN/END pairs, and the anomalies they can raise.

use std::fmt;
use std::path::PathBuf;

/// A source line kept for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    pub file: PathBuf,
    pub line: usize,
    pub text: String,
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} in {}: {}", self.line, self.file.display(), self.text)
    }
}

/// Irregular BEGIN/END/INCLUDE usage found during the walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anomaly {
    EmptyBegin(SourceLine),
    EmptyEnd(SourceLine),
    EmptyInclude(SourceLine),
    /// END with nothing open.
    UnmatchedEnd(SourceLine),
    /// END naming a different block than the innermost BEGIN.
    Mismatch { begin: SourceLine, end: SourceLine },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::EmptyBegin(at) => {
                write!(f, "empty BEGIN statement at line {} in {}", at.line, at.file.display())
            }
            Anomaly::EmptyEnd(at) => {
                write!(f, "empty END statement at line {} in {}", at.line, at.file.display())
            }
            Anomaly::EmptyInclude(at) => {
                write!(f, "empty INCLUDE statement at line {} in {}", at.line, at.file.display())
            }
            Anomaly::UnmatchedEnd(at) => write!(f, "END statement without BEGIN {}", at),
            Anomaly::Mismatch { begin, end } => write!(
                f,
                "mismatched BEGIN and END statements:\nBEGIN statement {}\nEND statement {}",
                begin, end
            ),
        }
    }
}

struct Block {
    name: String,
    origin: SourceLine,
}

/// Names of the open BEGIN blocks, outermost first.
#[derive(Default)]
pub struct ContextStack {
    blocks: Vec<Block>,
}

impl ContextStack {
    /// Open a block. The name is stored lower-cased.
    pub fn push(&mut self, name: &str, origin: SourceLine) {
        self.blocks.push(Block {
            name: name.to_lowercase(),
            origin,
        });
    }

    /// Close the innermost block, returning its name and the BEGIN line that opened it.
    pub fn pop(&mut self) -> Option<(String, SourceLine)> {
        self.blocks.pop().map(|b| (b.name, b.origin))
    }

    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Dot-joined path, empty at top level.
    pub fn path(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}
