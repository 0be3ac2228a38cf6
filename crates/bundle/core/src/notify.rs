//! Fire-and-forget broadcasts to every session participant.

use crate::definition::BundleId;

/// Receives donation broadcasts.
///
/// Called at most once per real donation: only the participant whose store
/// write performed the `false → true` transition reports it. Implementations
/// must not block; nothing they return is consumed.
pub trait NotificationSink: Send + Sync {
    fn broadcast_donation(&self, donor: &str, item_name: &str);

    fn broadcast_bundle_complete(&self, bundle: &BundleId);

    fn broadcast_milestone(&self, completed_bundles: usize);

    /// Hook for achievement bookkeeping after a donation landed.
    fn check_achievements(&self, _bundle: &BundleId) {}
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn broadcast_donation(&self, _donor: &str, _item_name: &str) {}

    fn broadcast_bundle_complete(&self, _bundle: &BundleId) {}

    fn broadcast_milestone(&self, _completed_bundles: usize) {}
}
