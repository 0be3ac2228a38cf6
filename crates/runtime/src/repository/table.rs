//! The slot table shared by every store adapter.

use std::collections::{BTreeMap, BTreeSet};

use bundle_core::{BundleId, StoreError};
use serde::{Deserialize, Serialize};

/// Slot flags per bundle plus the once-only markers: completed bundles,
/// claimed rewards and announced milestones.
///
/// Flags only ever go from `false` to `true`. Array lengths are fixed when a
/// bundle is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTable {
    records: BTreeMap<BundleId, Vec<bool>>,
    completed: BTreeSet<BundleId>,
    claimed: BTreeSet<BundleId>,
    milestones: BTreeSet<usize>,
}

impl StoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the record for `bundle` if absent.
    ///
    /// Returns true if a record was created.
    ///
    /// # Errors
    ///
    /// `LayoutMismatch` if an existing record has a different length.
    pub fn register(&mut self, bundle: &BundleId, slots: usize) -> Result<bool, StoreError> {
        match self.records.get(bundle) {
            Some(flags) if flags.len() != slots => Err(StoreError::LayoutMismatch {
                bundle: bundle.clone(),
                expected: slots,
                found: flags.len(),
            }),
            Some(_) => Ok(false),
            None => {
                self.records.insert(bundle.clone(), vec![false; slots]);
                Ok(true)
            }
        }
    }

    pub fn get(&self, bundle: &BundleId) -> Result<Vec<bool>, StoreError> {
        self.flags(bundle).map(<[bool]>::to_vec)
    }

    pub fn flags(&self, bundle: &BundleId) -> Result<&[bool], StoreError> {
        self.records
            .get(bundle)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownBundle(bundle.clone()))
    }

    /// Sets one flag. Returns true only if it was previously unset.
    pub fn try_set(&mut self, bundle: &BundleId, slot: usize) -> Result<bool, StoreError> {
        let flags = self
            .records
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

    /// Reverts a transition whose persistence failed.
    pub(crate) fn revert(&mut self, bundle: &BundleId, slot: usize) {
        if let Some(flag) = self
            .records
            .get_mut(bundle)
            .and_then(|flags| flags.get_mut(slot))
        {
            *flag = false;
        }
    }

    /// Marks `bundle` complete once at least `required` flags are set.
    ///
    /// Returns true only for the first call at or above the threshold.
    pub fn try_mark_complete(
        &mut self,
        bundle: &BundleId,
        required: usize,
    ) -> Result<bool, StoreError> {
        let filled = self.flags(bundle)?.iter().filter(|flag| **flag).count();
        if filled < required {
            return Ok(false);
        }
        Ok(self.completed.insert(bundle.clone()))
    }

    pub(crate) fn revert_complete(&mut self, bundle: &BundleId) {
        self.completed.remove(bundle);
    }

    pub fn is_marked_complete(&self, bundle: &BundleId) -> bool {
        self.completed.contains(bundle)
    }

    /// Marks the milestone at `completed_bundles` announced. Returns true only once.
    pub fn try_claim_milestone(&mut self, completed_bundles: usize) -> bool {
        self.milestones.insert(completed_bundles)
    }

    pub(crate) fn revert_milestone(&mut self, completed_bundles: usize) {
        self.milestones.remove(&completed_bundles);
    }

    /// Milestones already announced, ascending.
    pub fn milestones(&self) -> impl Iterator<Item = usize> + '_ {
        self.milestones.iter().copied()
    }

    /// Marks the reward of `bundle` as claimed. Returns true only for the first claim.
    pub fn try_claim(&mut self, bundle: &BundleId) -> Result<bool, StoreError> {
        if !self.records.contains_key(bundle) {
            return Err(StoreError::UnknownBundle(bundle.clone()));
        }
        Ok(self.claimed.insert(bundle.clone()))
    }

    pub(crate) fn revert_claim(&mut self, bundle: &BundleId) {
        self.claimed.remove(bundle);
    }

    pub fn is_claimed(&self, bundle: &BundleId) -> Result<bool, StoreError> {
        if !self.records.contains_key(bundle) {
            return Err(StoreError::UnknownBundle(bundle.clone()));
        }
        Ok(self.claimed.contains(bundle))
    }

    /// Records in bundle id order.
    pub fn records(&self) -> impl Iterator<Item = (&BundleId, &[bool])> {
        self.records
            .iter()
            .map(|(bundle, flags)| (bundle, flags.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
