//! Tree walk: include stack, BEGIN/END context, record production.

pub mod context;
pub mod walker;

pub use context::{Anomaly, ContextStack, SourceLine};
pub use walker::Walker;
