//! Repository layer for the shared slot table.
//!
//! Repositories hold the data that CHANGES while participants donate:
//! - Per-bundle slot flags (the authoritative completion record)
//! - Claimed rewards
//!
//! Static content (bundle definitions, items) is handled by `bundle-content`
//! and the oracles, not by repositories.

mod error;
mod file;
mod memory;
mod table;

use bundle_core::{BundleStore, RewardLedger};

pub use error::{RepositoryError, Result};
pub use file::FileBundleStore;
pub use memory::InMemoryBundleStore;
pub use table::StoreTable;

/// A store that also records reward claims.
///
/// Blanket-implemented, so any `BundleStore + RewardLedger` can back a board.
pub trait BundleRepository: BundleStore + RewardLedger {}

impl<T> BundleRepository for T where T: BundleStore + RewardLedger + ?Sized {}
