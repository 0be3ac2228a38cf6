//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for data directories.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BUNDLE_DATA_DIR";

/// Get the platform-specific data directory for bundle stores
///
/// `BUNDLE_DATA_DIR` wins when set. Otherwise follows platform conventions:
/// - macOS: `~/Library/Application Support/bundles`
/// - Linux: `~/.local/share/bundles` (or `$XDG_DATA_HOME/bundles`)
/// - Windows: `%APPDATA%\bundles`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "bundles")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Default content directory: `<data dir>/content`
pub fn content_dir() -> PathBuf {
    data_dir().join("content")
}

/// Default store file: `<data dir>/bundles.bin`
pub fn store_file() -> PathBuf {
    data_dir().join("bundles.bin")
}
