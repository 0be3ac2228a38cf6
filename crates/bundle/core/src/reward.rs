use crate::definition::RewardDescriptor;
use crate::item::Item;

/// Turns a reward descriptor into concrete items.
///
/// Invoked on demand when a completed bundle's reward is collected, never
/// while donating. Returns an empty list if the reward cannot be built.
pub trait RewardResolver: Send + Sync {
    fn resolve(&self, reward: &RewardDescriptor) -> Vec<Item>;
}
