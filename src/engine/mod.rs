//! Engine module: line-level survex handling and the CLI front end

pub mod arg_parser;
pub mod cli;
pub mod encoding;
pub mod extract;
pub mod source;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{handle_run, keyword_set_from_cli, setup_opts};
pub use encoding::probe_encoding;
pub use extract::{Directive, extract_directive};
pub use source::LineSource;
pub use tools::{expand_tabs, resolve_include, strip_comment, with_svx_suffix};
