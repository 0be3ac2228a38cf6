//! Test doubles for the store and sink contracts.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::definition::BundleId;
use crate::notify::NotificationSink;
use crate::store::{BundleStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<BundleId, Vec<bool>>>,
    completed: Mutex<HashSet<BundleId>>,
}

impl MemoryStore {
    pub fn with_record(bundle: &str, flags: &[bool]) -> Self {
        let store = Self::default();
        store
            .records
            .lock()
            .unwrap()
            .insert(BundleId::new(bundle), flags.to_vec());
        store
    }

    pub fn flags(&self, bundle: &str) -> Vec<bool> {
        self.records.lock().unwrap()[&BundleId::new(bundle)].clone()
    }

    /// Fills a slot behind every view's back, like a remote participant would.
    pub fn fill_remotely(&self, bundle: &str, slot: usize) {
        self.records
            .lock()
            .unwrap()
            .get_mut(&BundleId::new(bundle))
            .unwrap()[slot] = true;
    }
}

impl BundleStore for MemoryStore {
    fn register(&self, bundle: &BundleId, slots: usize) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .entry(bundle.clone())
            .or_insert_with(|| vec![false; slots]);
        Ok(())
    }

    fn get(&self, bundle: &BundleId) -> Result<Vec<bool>, StoreError> {
        self.records
            .lock()
            .unwrap()
            .get(bundle)
            .cloned()
            .ok_or_else(|| StoreError::UnknownBundle(bundle.clone()))
    }

    fn try_set(&self, bundle: &BundleId, slot: usize) -> Result<bool, StoreError> {
        let mut records = self.records.lock().unwrap();
        let flags = records
            .get_mut(bundle)
            .ok_or_else(|| StoreError::UnknownBundle(bundle.clone()))?;
        let len = flags.len();
        let flag = flags.get_mut(slot).ok_or_else(|| StoreError::SlotOutOfRange {
            bundle: bundle.clone(),
            slot,
            len,
        })?;
        let transitioned = !*flag;
        *flag = true;
        Ok(transitioned)
    }

    fn try_mark_complete(&self, bundle: &BundleId, required: usize) -> Result<bool, StoreError> {
        let records = self.records.lock().unwrap();
        let flags = records
            .get(bundle)
            .ok_or_else(|| StoreError::UnknownBundle(bundle.clone()))?;
        if flags.iter().filter(|filled| **filled).count() < required {
            return Ok(false);
        }
        Ok(self.completed.lock().unwrap().insert(bundle.clone()))
    }
}

/// Serves reads from a snapshot taken before a remote write landed.
pub struct StaleReadStore<'a> {
    pub inner: &'a MemoryStore,
    pub snapshot: Vec<bool>,
}

impl BundleStore for StaleReadStore<'_> {
    fn register(&self, bundle: &BundleId, slots: usize) -> Result<(), StoreError> {
        self.inner.register(bundle, slots)
    }

    fn get(&self, _bundle: &BundleId) -> Result<Vec<bool>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn try_set(&self, bundle: &BundleId, slot: usize) -> Result<bool, StoreError> {
        self.inner.try_set(bundle, slot)
    }

    fn try_mark_complete(&self, bundle: &BundleId, required: usize) -> Result<bool, StoreError> {
        self.inner.try_mark_complete(bundle, required)
    }
}

/// Reads succeed, writes fail.
pub struct ReadOnlyStore<'a>(pub &'a MemoryStore);

impl BundleStore for ReadOnlyStore<'_> {
    fn register(&self, bundle: &BundleId, slots: usize) -> Result<(), StoreError> {
        self.0.register(bundle, slots)
    }

    fn get(&self, bundle: &BundleId) -> Result<Vec<bool>, StoreError> {
        self.0.get(bundle)
    }

    fn try_set(&self, _bundle: &BundleId, _slot: usize) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    fn try_mark_complete(&self, _bundle: &BundleId, _required: usize) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Broadcast {
    Donation { donor: String, item: String },
    Complete(BundleId),
    Milestone(usize),
    Achievements(BundleId),
}

#[derive(Default)]
pub struct RecordingSink {
    pub broadcasts: Mutex<Vec<Broadcast>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<Broadcast> {
        std::mem::take(&mut *self.broadcasts.lock().unwrap())
    }
}

impl NotificationSink for RecordingSink {
    fn broadcast_donation(&self, donor: &str, item_name: &str) {
        self.broadcasts.lock().unwrap().push(Broadcast::Donation {
            donor: donor.to_string(),
            item: item_name.to_string(),
        });
    }

    fn broadcast_bundle_complete(&self, bundle: &BundleId) {
        self.broadcasts
            .lock()
            .unwrap()
            .push(Broadcast::Complete(bundle.clone()));
    }

    fn broadcast_milestone(&self, completed_bundles: usize) {
        self.broadcasts
            .lock()
            .unwrap()
            .push(Broadcast::Milestone(completed_bundles));
    }

    fn check_achievements(&self, bundle: &BundleId) {
        self.broadcasts
            .lock()
            .unwrap()
            .push(Broadcast::Achievements(bundle.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_follows_store_contract() {
        let store = MemoryStore::with_record("Pantry/0", &[false, false]);
        let bundle = BundleId::new("Pantry/0");

        assert_eq!(
            store.try_set(&bundle, 2),
            Err(StoreError::SlotOutOfRange {
                bundle: bundle.clone(),
                slot: 2,
                len: 2,
            })
        );
        assert!(!store.try_mark_complete(&bundle, 1).unwrap());
        assert!(store.try_set(&bundle, 0).unwrap());
        assert!(store.try_mark_complete(&bundle, 1).unwrap());
        assert!(!store.try_mark_complete(&bundle, 1).unwrap());
    }
}
