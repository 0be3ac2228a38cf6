//! Bundle catalog loader.

use std::path::Path;

use bundle_core::BundleDefinition;

use crate::loaders::{LoadResult, read_file};
use crate::raw::{BundleCatalog, build_definitions};

/// Loader for bundle catalogs from RON files.
pub struct BundleLoader;

impl BundleLoader {
    /// Parse a bundle catalog without validating it.
    ///
    /// Use this when every definition error should be reported, not just the first.
    pub fn load_catalog(path: &Path) -> LoadResult<BundleCatalog> {
        let content = read_file(path)?;
        Self::parse_catalog(&content)
    }

    pub fn parse_catalog(content: &str) -> LoadResult<BundleCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bundle catalog RON: {}", e))
    }

    /// Load and validate a bundle catalog.
    ///
    /// Fails if any bundle is malformed; the error lists every problem found.
    pub fn load(path: &Path) -> LoadResult<Vec<BundleDefinition>> {
        let catalog = Self::load_catalog(path)?;

        build_definitions(catalog.bundles).map_err(|errors| {
            let details = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            anyhow::anyhow!(
                "Invalid bundle catalog {} ({} errors): {}",
                path.display(),
                errors.len(),
                details
            )
        })
    }
}
