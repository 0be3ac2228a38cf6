//! Content loaders for reading bundle data from files.
//!
//! This module provides loaders that convert RON/TOML files into validated
//! `bundle-core` types. Raw formats live in [`crate::raw`].

pub mod bundles;
pub mod config;
pub mod factory;
pub mod item;

pub use bundles::BundleLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
