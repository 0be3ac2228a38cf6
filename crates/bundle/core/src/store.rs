//! Shared slot table contracts.
//!
//! The store is the only durable record of what has been donated. Every
//! participant's [`Bundle`](crate::Bundle) view is a projection of it, and
//! views re-read it before each donation decision.

use crate::definition::BundleId;
use crate::error::{EngineError, ErrorSeverity};

/// Persistent, replicated mapping of bundle id to per-slot completion flags.
///
/// # Contract
///
/// - A record's length is fixed by [`register`](Self::register) and never changes
/// - Flags only ever move from `false` to `true`
/// - [`try_set`](Self::try_set) is a compare-and-set: exactly one caller observes
///   the transition for a given `(bundle, slot)`
/// - [`try_mark_complete`](Self::try_mark_complete) succeeds at most once per
///   bundle, and only when the stored flags meet the threshold
pub trait BundleStore: Send + Sync {
    /// Creates an all-`false` record of `slots` flags if none exists.
    ///
    /// # Errors
    ///
    /// `LayoutMismatch` if a record exists with a different length.
    fn register(&self, bundle: &BundleId, slots: usize) -> Result<(), StoreError>;

    /// Current flags of a bundle.
    fn get(&self, bundle: &BundleId) -> Result<Vec<bool>, StoreError>;

    /// Sets `slot` to `true`. Returns whether this call performed the transition.
    fn try_set(&self, bundle: &BundleId, slot: usize) -> Result<bool, StoreError>;

    /// Records that `bundle` has at least `required` filled slots.
    ///
    /// Returns true only for the first call made once the stored flags reach
    /// `required`. Later calls, and calls below the threshold, return false.
    fn try_mark_complete(&self, bundle: &BundleId, required: usize) -> Result<bool, StoreError>;
}

/// Durable once-only reward claims, keyed like the slot table.
pub trait RewardLedger: Send + Sync {
    /// Marks the reward of `bundle` claimed. Returns whether this call claimed it.
    fn try_claim_reward(&self, bundle: &BundleId) -> Result<bool, StoreError>;

    fn is_reward_claimed(&self, bundle: &BundleId) -> Result<bool, StoreError>;

    /// Marks the milestone at `completed_bundles` announced. Returns whether
    /// this call marked it.
    fn try_claim_milestone(&self, completed_bundles: usize) -> Result<bool, StoreError>;
}

/// Errors surfaced by store implementations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreError {
    #[error("bundle {0} has no store record")]
    UnknownBundle(BundleId),

    #[error("slot {slot} out of range for bundle {bundle} ({len} slots)")]
    SlotOutOfRange {
        bundle: BundleId,
        slot: usize,
        len: usize,
    },

    #[error("store record for bundle {bundle} has {found} slots, definition has {expected}")]
    LayoutMismatch {
        bundle: BundleId,
        expected: usize,
        found: usize,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store lock was poisoned")]
    LockPoisoned,
}

impl EngineError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        use StoreError::*;
        match self {
            Unavailable(_) => ErrorSeverity::Recoverable,
            UnknownBundle(_) | SlotOutOfRange { .. } | LayoutMismatch { .. } => {
                ErrorSeverity::Internal
            }
            LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StoreError::*;
        match self {
            UnknownBundle(_) => "STORE_UNKNOWN_BUNDLE",
            SlotOutOfRange { .. } => "STORE_SLOT_OUT_OF_RANGE",
            LayoutMismatch { .. } => "STORE_LAYOUT_MISMATCH",
            Unavailable(_) => "STORE_UNAVAILABLE",
            LockPoisoned => "STORE_LOCK_POISONED",
        }
    }
}
