//! Character encoding detection by full-file trial decode.

use log::debug;
use std::path::Path;

use crate::Encoding;
use crate::error::{SvxError, SvxResult};

/// Return the first of `candidates` that decodes the whole of `path` without error.
pub fn probe_encoding(path: &Path, candidates: &[Encoding]) -> SvxResult<Encoding> {
    let bytes = std::fs::read(path).map_err(|e| SvxError::io(path, e))?;
    let found = candidates
        .iter()
        .copied()
        .find(|encoding| encoding.decode(&bytes).is_some());
    match found {
        Some(encoding) => {
            debug!("{}: decoded as {}", path.display(), encoding);
            Ok(encoding)
        }
        None => Err(SvxError::Encoding {
            path: path.to_path_buf(),
        }),
    }
}
