//! Event types for different topics.

use bundle_core::BundleId;
use serde::{Deserialize, Serialize};

/// A participant donated an item somewhere on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationEvent {
    pub donor: String,
    pub item_name: String,
}

/// Board-wide completion announcements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionEvent {
    /// A bundle was completed by a live donation.
    BundleCompleted { bundle: BundleId },

    /// The number of completed bundles reached a configured milestone.
    Milestone { completed_bundles: usize },

    /// A slot was filled; achievement progress should be re-evaluated.
    AchievementCheck { bundle: BundleId },
}
