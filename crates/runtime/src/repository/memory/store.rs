//! In-memory bundle store shared by every participant in one process.

use std::sync::RwLock;

use bundle_core::{BundleId, BundleStore, RewardLedger, StoreError};

use crate::repository::{RepositoryError, StoreTable};

/// In-memory implementation of [`BundleStore`] and [`RewardLedger`].
///
/// Every compare-and-set runs under one write lock, so concurrent donors
/// racing for the same slot see exactly one `true`.
pub struct InMemoryBundleStore {
    table: RwLock<StoreTable>,
}

impl InMemoryBundleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_table(StoreTable::new())
    }

    /// Create a store seeded with existing records.
    pub fn with_table(table: StoreTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> Result<StoreTable, RepositoryError> {
        let table = self
            .table
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.clone())
    }
}

impl Default for InMemoryBundleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleStore for InMemoryBundleStore {
    fn register(&self, bundle: &BundleId, slots: usize) -> Result<(), StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        table.register(bundle, slots)?;
        Ok(())
    }

    fn get(&self, bundle: &BundleId) -> Result<Vec<bool>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::LockPoisoned)?;
        table.get(bundle)
    }

    fn try_set(&self, bundle: &BundleId, slot: usize) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        table.try_set(bundle, slot)
    }

    fn try_mark_complete(&self, bundle: &BundleId, required: usize) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        table.try_mark_complete(bundle, required)
    }
}

impl RewardLedger for InMemoryBundleStore {
    fn try_claim_reward(&self, bundle: &BundleId) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        table.try_claim(bundle)
    }

    fn is_reward_claimed(&self, bundle: &BundleId) -> Result<bool, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::LockPoisoned)?;
        table.is_claimed(bundle)
    }

    fn try_claim_milestone(&self, completed_bundles: usize) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(table.try_claim_milestone(completed_bundles))
    }
}
