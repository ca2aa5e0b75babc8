//! One open survex file, read line by line.

use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::encoding::probe_encoding;
use crate::Encoding;
use crate::error::{SvxError, SvxResult};

/// Open file plus its line counter. The handle closes when the source is dropped.
pub struct LineSource {
    path: PathBuf,
    encoding: Encoding,
    reader: BufReader<File>,
    line_number: usize,
    buf: Vec<u8>,
}

impl LineSource {
    /// Probe the encoding of `path` and open it with the line counter at zero.
    pub fn open(path: &Path, candidates: &[Encoding], trace: bool) -> SvxResult<Self> {
        if !path.is_file() {
            return Err(SvxError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let encoding = probe_encoding(path, candidates)?;
        let file = File::open(path).map_err(|e| SvxError::io(path, e))?;
        if trace {
            info!("Entering {} ({})", path.display(), encoding);
        }
        Ok(Self {
            path: path.to_path_buf(),
            encoding,
            reader: BufReader::new(file),
            line_number: 0,
            buf: Vec::new(),
        })
    }

    /// Next line (terminator included), or `None` at end of file. Bumps the line counter.
    pub fn next_line(&mut self) -> SvxResult<Option<String>> {
        self.buf.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|e| SvxError::io(&self.path, e))?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        // The probe already accepted the whole file, and '\n' never splits a UTF-8 sequence.
        let text = self
            .encoding
            .decode(&self.buf)
            .ok_or_else(|| SvxError::Encoding {
                path: self.path.clone(),
            })?;
        Ok(Some(text.into_owned()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of the line most recently returned (0 before the first read).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
