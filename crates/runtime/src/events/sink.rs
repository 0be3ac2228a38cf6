//! [`NotificationSink`] that publishes onto the [`EventBus`].

use bundle_core::{BundleId, NotificationSink};

use super::bus::{Event, EventBus};
use super::types::{CompletionEvent, DonationEvent};

/// Routes engine broadcasts to bus topics.
///
/// Donations go to [`Topic::Donation`](super::Topic::Donation); completions,
/// milestones and achievement checks go to
/// [`Topic::Completion`](super::Topic::Completion).
#[derive(Clone)]
pub struct EventBusSink {
    bus: EventBus,
}

impl EventBusSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

impl NotificationSink for EventBusSink {
    fn broadcast_donation(&self, donor: &str, item_name: &str) {
        self.bus.publish(Event::Donation(DonationEvent {
            donor: donor.to_string(),
            item_name: item_name.to_string(),
        }));
    }

    fn broadcast_bundle_complete(&self, bundle: &BundleId) {
        self.bus
            .publish(Event::Completion(CompletionEvent::BundleCompleted {
                bundle: bundle.clone(),
            }));
    }

    fn broadcast_milestone(&self, completed_bundles: usize) {
        self.bus
            .publish(Event::Completion(CompletionEvent::Milestone {
                completed_bundles,
            }));
    }

    fn check_achievements(&self, bundle: &BundleId) {
        self.bus
            .publish(Event::Completion(CompletionEvent::AchievementCheck {
                bundle: bundle.clone(),
            }));
    }
}
