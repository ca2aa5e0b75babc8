//! Depth-first walk of a survex tree: follows INCLUDE, tracks BEGIN/END, yields records.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use super::context::{Anomaly, ContextStack, SourceLine};
use crate::engine::extract::{Directive, extract_directive};
use crate::engine::source::LineSource;
use crate::engine::tools::{absolutize, expand_tabs, resolve_include, strip_comment, with_svx_suffix};
use crate::error::{SvxError, SvxResult};
use crate::{DirectiveRecord, KeywordSet, Opts, StructurePolicy, UnbalancedPolicy};

/// Lazy, single-use walk over a survex tree.
///
/// Iterating yields one [`DirectiveRecord`] per reported directive (or pattern match in grep mode),
/// in depth-first order: an included file is read to the end before the line after its INCLUDE.
/// The first error ends the iteration.
pub struct Walker<'o> {
    opts: &'o Opts,
    /// Reporting set plus INCLUDE/BEGIN/END.
    recognised: KeywordSet,
    top_level: PathBuf,
    /// Open files of the include chain; the last one is being read.
    frames: Vec<LineSource>,
    context: ContextStack,
    anomalies: Vec<Anomaly>,
    files_visited: usize,
    finished: bool,
}

impl<'o> Walker<'o> {
    /// Open the top-level file (`.svx` appended when missing).
    pub fn new(top_level: &Path, opts: &'o Opts) -> SvxResult<Self> {
        let mut top = with_svx_suffix(top_level);
        if opts.absolute_paths {
            top = absolutize(&top)?;
        }
        let source = LineSource::open(&top, &opts.encodings, opts.trace)?;
        Ok(Self {
            opts,
            recognised: opts.keywords.with_structural(),
            top_level: top,
            frames: vec![source],
            context: ContextStack::default(),
            anomalies: Vec::new(),
            files_visited: 1,
            finished: false,
        })
    }

    /// Top-level file as it is reported in records.
    pub fn top_level(&self) -> &Path {
        &self.top_level
    }

    /// Files opened so far, the top-level file included.
    pub fn files_visited(&self) -> usize {
        self.files_visited
    }

    /// Current include depth (0 once the walk is over).
    pub fn include_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn context_depth(&self) -> usize {
        self.context.depth()
    }

    pub fn context_path(&self) -> String {
        self.context.path()
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn into_anomalies(self) -> Vec<Anomaly> {
        self.anomalies
    }

    /// Read lines until one produces a record, or the tree is exhausted.
    fn step(&mut self) -> SvxResult<Option<DirectiveRecord>> {
        loop {
            let Some(source) = self.frames.last_mut() else {
                self.check_balance()?;
                return Ok(None);
            };
            match source.next_line()? {
                Some(raw) => {
                    if let Some(record) = self.process_line(&raw)? {
                        return Ok(Some(record));
                    }
                }
                None => {
                    if let Some(done) = self.frames.pop() {
                        debug!(
                            "Leaving {} after {} lines",
                            done.path().display(),
                            done.line_number()
                        );
                    }
                }
            }
        }
    }

    fn process_line(&mut self, raw: &str) -> SvxResult<Option<DirectiveRecord>> {
        let opts = self.opts;
        let line = raw.trim();
        let directive = self.classify(line);
        // END is reported with the path it closes back to, like its BEGIN.
        let is_end = directive.as_ref().is_some_and(|d| d.key == "END");
        if let Some(end) = directive.as_ref().filter(|_| is_end) {
            self.apply_structure(end, line)?;
        }

        let record = match &opts.pattern {
            Some(pattern) => pattern
                .find(line)
                .map(|m| self.record(m.as_str().to_string(), String::new(), line)),
            None => directive
                .as_ref()
                .filter(|d| opts.keywords.contains(&d.key))
                .map(|d| {
                    let keyword = if opts.preserve_case {
                        d.name.clone()
                    } else {
                        d.key.clone()
                    };
                    self.record(keyword, d.argument_text(), line)
                }),
        };

        if let Some(other) = directive.as_ref().filter(|_| !is_end) {
            self.apply_structure(other, line)?;
        }
        Ok(record)
    }

    fn classify<'l>(&self, line: &'l str) -> Option<Directive<'l>> {
        let clean = strip_comment(line, self.opts.markers.comment);
        extract_directive(
            clean,
            &self.recognised,
            self.opts.markers.directive,
            self.opts.case_sensitive,
        )
    }

    fn apply_structure(&mut self, directive: &Directive<'_>, line: &str) -> SvxResult<()> {
        match directive.key.as_str() {
            "BEGIN" => self.begin(directive, line),
            "END" => self.end(directive, line),
            "INCLUDE" => self.include(directive, line),
            _ => Ok(()),
        }
    }

    fn begin(&mut self, directive: &Directive<'_>, line: &str) -> SvxResult<()> {
        let here = self.source_line(line);
        match directive.arguments.first() {
            Some(name) => {
                self.context.push(name, here);
                Ok(())
            }
            None => self.anomaly(Anomaly::EmptyBegin(here)),
        }
    }

    fn end(&mut self, directive: &Directive<'_>, line: &str) -> SvxResult<()> {
        let here = self.source_line(line);
        let Some(name) = directive.arguments.first() else {
            return self.anomaly(Anomaly::EmptyEnd(here));
        };
        match self.context.pop() {
            Some((open, begin)) if open != name.to_lowercase() => {
                self.anomaly(Anomaly::Mismatch { begin, end: here })
            }
            Some(_) => Ok(()),
            None => self.anomaly(Anomaly::UnmatchedEnd(here)),
        }
    }

    fn include(&mut self, directive: &Directive<'_>, line: &str) -> SvxResult<()> {
        if directive.arguments.is_empty() {
            let here = self.source_line(line);
            return self.anomaly(Anomaly::EmptyInclude(here));
        }
        let Some(current) = self.frames.last() else {
            return Ok(());
        };
        let target = resolve_include(current.path(), &directive.argument_text());
        debug!(
            "{}:{} includes {}",
            current.path().display(),
            current.line_number(),
            target.display()
        );
        if let Ok(canonical) = std::fs::canonicalize(&target)
            && self
                .frames
                .iter()
                .any(|f| std::fs::canonicalize(f.path()).is_ok_and(|p| p == canonical))
        {
            let chain = self
                .frames
                .iter()
                .map(|f| f.path().display().to_string())
                .chain(std::iter::once(target.display().to_string()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(SvxError::IncludeCycle {
                path: target,
                chain,
            });
        }
        let source = LineSource::open(&target, &self.opts.encodings, self.opts.trace)?;
        self.frames.push(source);
        self.files_visited += 1;
        Ok(())
    }

    fn anomaly(&mut self, anomaly: Anomaly) -> SvxResult<()> {
        match self.opts.structure {
            StructurePolicy::Warn => {
                for line in anomaly.to_string().lines() {
                    warn!("{}", line);
                }
            }
            StructurePolicy::Ignore => debug!("{}", anomaly),
            StructurePolicy::Fail => {
                return Err(SvxError::StructuralMismatch {
                    message: anomaly.to_string(),
                });
            }
        }
        self.anomalies.push(anomaly);
        Ok(())
    }

    fn check_balance(&self) -> SvxResult<()> {
        if self.context.is_empty() {
            return Ok(());
        }
        let depth = self.context.depth();
        let open = self.context.path();
        match self.opts.unbalanced {
            UnbalancedPolicy::Ignore => Ok(()),
            UnbalancedPolicy::Warn => {
                warn!(
                    "{} unclosed BEGIN block(s) at end of {}: {}",
                    depth,
                    self.top_level.display(),
                    open
                );
                Ok(())
            }
            UnbalancedPolicy::Fail => Err(SvxError::UnbalancedContext {
                path: self.top_level.clone(),
                depth,
                open,
            }),
        }
    }

    fn source_line(&self, line: &str) -> SourceLine {
        let (file, number) = self
            .frames
            .last()
            .map(|s| (s.path().to_path_buf(), s.line_number()))
            .unwrap_or_default();
        SourceLine {
            file,
            line: number,
            text: line.to_string(),
        }
    }

    fn record(&self, keyword: String, argument: String, line: &str) -> DirectiveRecord {
        let at = self.source_line(line);
        let encoding = self
            .frames
            .last()
            .map(|s| s.encoding())
            .unwrap_or(crate::Encoding::Utf8);
        DirectiveRecord {
            file: at.file,
            encoding,
            line: at.line,
            keyword,
            argument,
            path: self.context.path(),
            full: expand_tabs(line),
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = SvxResult<DirectiveRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                self.frames.clear();
                Some(Err(e))
            }
        }
    }
}
