//! Application configuration constants.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Settings file looked up next to the top-level survex file.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Survex syntax ----

/// Canonical extension of survex source files (no dot).
pub const SVX_EXTENSION: &str = "svx";

/// Tab stop width used when expanding tabs in the `full` column.
pub const TAB_SIZE: usize = 8;

// ---- Spreadsheet export ----

/// Worksheet name used for exported tables.
pub const SHEET_NAME: &str = "keywords";
