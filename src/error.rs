//! Typed errors raised while walking a survex tree.

use std::path::PathBuf;
use thiserror::Error;

pub type SvxResult<T> = std::result::Result<T, SvxError>;

#[derive(Error, Debug)]
pub enum SvxError {
    #[error("survex file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("could not determine the character encoding for {}", path.display())]
    Encoding { path: PathBuf },

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    StructuralMismatch { message: String },

    #[error("{depth} unclosed BEGIN block(s) at end of {}: {open}", path.display())]
    UnbalancedContext {
        path: PathBuf,
        depth: usize,
        open: String,
    },

    #[error("{} is already being read (include cycle: {chain})", path.display())]
    IncludeCycle { path: PathBuf, chain: String },

    #[error("cannot write {}: {message}", path.display())]
    Export { path: PathBuf, message: String },

    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl SvxError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SvxError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
