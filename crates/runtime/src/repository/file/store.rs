//! File-backed bundle store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use bundle_core::{BundleId, BundleStore, RewardLedger, StoreError};

use crate::repository::{RepositoryError, Result, StoreTable};

/// File-backed implementation of [`BundleStore`] and [`RewardLedger`].
///
/// The whole [`StoreTable`] lives in one bincode file. Every net-new
/// transition rewrites it through a temp file and an atomic rename before the
/// caller sees `true`. If the write fails, the transition is reverted and the
/// caller gets [`StoreError::Unavailable`], so the donor keeps the item.
pub struct FileBundleStore {
    path: PathBuf,
    table: Mutex<StoreTable>,
}

impl FileBundleStore {
    /// Opens the store at `path`, loading it if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let table = if path.exists() {
            Self::load_table(&path)?
        } else {
            StoreTable::new()
        };

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Reads a store file without opening it for writing.
    pub fn load_table(path: &Path) -> Result<StoreTable> {
        let bytes = fs::read(path)?;
        let table: StoreTable = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded store table ({} bundles) from {}", table.len(), path.display());

        Ok(table)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> Result<StoreTable> {
        let table = self
            .table
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.clone())
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, StoreTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn persist(&self, table: &StoreTable) -> Result<()> {
        let temp_path = self.path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(table).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved store table to {}", self.path.display());

        Ok(())
    }
}

fn unavailable(error: RepositoryError) -> StoreError {
    StoreError::Unavailable(error.to_string())
}

impl BundleStore for FileBundleStore {
    fn register(&self, bundle: &BundleId, slots: usize) -> std::result::Result<(), StoreError> {
        let mut table = self.lock()?;
        if table.register(bundle, slots)? {
            self.persist(&table).map_err(unavailable)?;
        }
        Ok(())
    }

    fn get(&self, bundle: &BundleId) -> std::result::Result<Vec<bool>, StoreError> {
        self.lock()?.get(bundle)
    }

    fn try_set(&self, bundle: &BundleId, slot: usize) -> std::result::Result<bool, StoreError> {
        let mut table = self.lock()?;
        if !table.try_set(bundle, slot)? {
            return Ok(false);
        }

        if let Err(error) = self.persist(&table) {
            table.revert(bundle, slot);
            tracing::warn!("Reverted slot {} of {}: {}", slot, bundle, error);
            return Err(unavailable(error));
        }
        Ok(true)
    }

    fn try_mark_complete(
        &self,
        bundle: &BundleId,
        required: usize,
    ) -> std::result::Result<bool, StoreError> {
        let mut table = self.lock()?;
        if !table.try_mark_complete(bundle, required)? {
            return Ok(false);
        }

        if let Err(error) = self.persist(&table) {
            table.revert_complete(bundle);
            tracing::warn!("Reverted completion of {}: {}", bundle, error);
            return Err(unavailable(error));
        }
        Ok(true)
    }
}

impl RewardLedger for FileBundleStore {
    fn try_claim_reward(&self, bundle: &BundleId) -> std::result::Result<bool, StoreError> {
        let mut table = self.lock()?;
        if !table.try_claim(bundle)? {
            return Ok(false);
        }

        if let Err(error) = self.persist(&table) {
            table.revert_claim(bundle);
            tracing::warn!("Reverted reward claim of {}: {}", bundle, error);
            return Err(unavailable(error));
        }
        Ok(true)
    }

    fn is_reward_claimed(&self, bundle: &BundleId) -> std::result::Result<bool, StoreError> {
        self.lock()?.is_claimed(bundle)
    }

    fn try_claim_milestone(&self, completed_bundles: usize) -> std::result::Result<bool, StoreError> {
        let mut table = self.lock()?;
        if !table.try_claim_milestone(completed_bundles) {
            return Ok(false);
        }

        if let Err(error) = self.persist(&table) {
            table.revert_milestone(completed_bundles);
            tracing::warn!("Reverted milestone {}: {}", completed_bundles, error);
            return Err(unavailable(error));
        }
        Ok(true)
    }
}
