//! Content factory for loading every content file from one directory.

use std::path::{Path, PathBuf};

use bundle_core::{BundleDefinition, EngineConfig};

use crate::loaders::{BundleLoader, ConfigLoader, ItemLoader, LoadResult};
use crate::raw::ItemCatalog;

/// Content factory that loads all bundle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── bundles.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.config_path())
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.items_path())
    }

    /// Load and validate bundle definitions from `bundles.ron`.
    pub fn load_bundles(&self) -> LoadResult<Vec<BundleDefinition>> {
        BundleLoader::load(&self.bundles_path())
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join("items.ron")
    }

    pub fn bundles_path(&self) -> PathBuf {
        self.data_dir.join("bundles.ron")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
