//! Donation outcomes.

use crate::error::{EngineError, ErrorSeverity};
use crate::events::BundleEvent;
use crate::item::Item;
use crate::store::StoreError;

/// Everything a donation attempt hands back to the caller.
///
/// `leftover` must be returned to the donor's holding slot whatever the outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositResult {
    pub leftover: Option<Item>,
    pub outcome: DepositOutcome,
    pub events: Vec<BundleEvent>,
}

impl DepositResult {
    pub(crate) fn rejected(item: Item, rejection: DepositRejection) -> Self {
        Self {
            leftover: Some(item),
            outcome: DepositOutcome::Rejected(rejection),
            events: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, DepositOutcome::Accepted { .. })
    }

    /// Slot filled by this donation, if it was accepted.
    pub fn slot(&self) -> Option<usize> {
        match self.outcome {
            DepositOutcome::Accepted { slot, .. } => Some(slot),
            DepositOutcome::Rejected(_) => None,
        }
    }

    /// True if this donation is the one that completed the bundle.
    pub fn completed_bundle(&self) -> bool {
        matches!(
            self.outcome,
            DepositOutcome::Accepted {
                completed_bundle: true,
                ..
            }
        )
    }

    pub fn rejection(&self) -> Option<&DepositRejection> {
        match &self.outcome {
            DepositOutcome::Rejected(rejection) => Some(rejection),
            DepositOutcome::Accepted { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepositOutcome {
    /// The item filled `slot`; `completed_bundle` is set on the completing donation only.
    Accepted { slot: usize, completed_bundle: bool },
    /// Nothing changed and the item is returned whole.
    Rejected(DepositRejection),
}

/// Why a donation did not land. Every variant leaves the item unconsumed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DepositRejection {
    #[error("donations are not allowed from this view")]
    WrongContext,

    #[error("item matches no open slot")]
    NoMatch,

    #[error("shared store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("slot {slot} was filled by another participant first")]
    RaceLost { slot: usize },
}

/// What the donor should be told.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositFeedback {
    /// Donations are not possible here (e.g. read-only review).
    WrongContext,
    /// Soft "that doesn't go here" feedback.
    NoMatch,
    /// Someone else already provided this ingredient.
    AlreadyProvided,
}

impl DepositRejection {
    /// Maps the rejection to user-facing feedback. A store failure reads as no match.
    pub fn feedback(&self) -> DepositFeedback {
        match self {
            Self::WrongContext => DepositFeedback::WrongContext,
            Self::NoMatch | Self::StoreUnavailable(_) => DepositFeedback::NoMatch,
            Self::RaceLost { .. } => DepositFeedback::AlreadyProvided,
        }
    }
}

impl EngineError for DepositRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WrongContext => ErrorSeverity::Validation,
            Self::NoMatch | Self::RaceLost { .. } => ErrorSeverity::Recoverable,
            Self::StoreUnavailable(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongContext => "DEPOSIT_WRONG_CONTEXT",
            Self::NoMatch => "DEPOSIT_NO_MATCH",
            Self::StoreUnavailable(_) => "DEPOSIT_STORE_UNAVAILABLE",
            Self::RaceLost { .. } => "DEPOSIT_RACE_LOST",
        }
    }
}
