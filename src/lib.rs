//! svxkw: tabulate keywords across a survex source tree reached through `*include`.

pub mod engine;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{SvxError, SvxResult};
pub use pipeline::{Anomaly, Walker};
pub use table::{COLUMNS, KeywordTable};
pub use types::*;

use log::debug;
use std::path::Path;

/// Walk the tree rooted at `top_level` and collect every reported record.
///
/// The whole tree is read before anything is returned, so a missing include or an
/// undecodable file yields an error and no partial table.
pub fn analyze(top_level: &Path, opts: &Opts) -> SvxResult<KeywordTable> {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let mut walker = Walker::new(top_level, opts)?;
    let records = walker.by_ref().collect::<SvxResult<Vec<_>>>()?;
    let top = walker.top_level().to_path_buf();
    let files_visited = walker.files_visited();
    debug!(
        "{} records from {} files under {}",
        records.len(),
        files_visited,
        top.display()
    );
    Ok(KeywordTable::new(
        top,
        records,
        files_visited,
        walker.into_anomalies(),
    ))
}
