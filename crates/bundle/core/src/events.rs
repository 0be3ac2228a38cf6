//! Events a bundle view emits for the presentation layer.
//!
//! The engine holds no reference to any UI. Callers receive these from
//! [`Bundle::try_deposit`](crate::Bundle::try_deposit) and
//! [`Bundle::advance`](crate::Bundle::advance) and route them wherever needed.

use crate::definition::BundleId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BundleEvent {
    /// Local feedback for the donor (slot animation, completion sound).
    DonationAccepted { bundle: BundleId, slot: usize },

    /// Replication payload announcing a newly filled slot.
    SlotFilled { bundle: BundleId, slot: usize },

    /// The bundle reached its required slot count through a live donation.
    BundleCompleted { bundle: BundleId },

    /// The completion timer elapsed; play the celebration sequence.
    CelebrationStarted { bundle: BundleId },
}

impl BundleEvent {
    pub fn bundle(&self) -> &BundleId {
        match self {
            Self::DonationAccepted { bundle, .. }
            | Self::SlotFilled { bundle, .. }
            | Self::BundleCompleted { bundle }
            | Self::CelebrationStarted { bundle } => bundle,
        }
    }
}
