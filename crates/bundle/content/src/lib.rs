//! Data-driven bundle content and loaders.
//!
//! This crate houses the raw content formats and the loaders that turn them
//! into validated `bundle-core` types:
//! - Bundle catalogs (data-driven via RON)
//! - Item catalogs and preserve products (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! Raw formats are parsed once at content-load time. Every malformed bundle
//! is reported here; the donation engine never sees unvalidated content.

#[cfg(feature = "serde")]
pub mod raw;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use raw::{
    BundleCatalog, BundleSpec, IngredientSpec, ItemCatalog, PreserveProduct, build_definitions,
};

#[cfg(feature = "loaders")]
pub use loaders::{BundleLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult};
