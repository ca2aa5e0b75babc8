pub mod config;
pub mod logger;
pub mod svxkw_toml;

pub use config::*;
pub use logger::setup_logging;
