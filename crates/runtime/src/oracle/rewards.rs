//! Reward resolution through the item oracle.
use std::sync::Arc;

use bundle_core::{Item, ItemOracle, RewardDescriptor, RewardResolver};

/// Resolves rewards by instantiating the described item.
///
/// An unknown reward item resolves to nothing.
pub struct OracleRewardResolver {
    items: Arc<dyn ItemOracle>,
}

impl OracleRewardResolver {
    pub fn new(items: Arc<dyn ItemOracle>) -> Self {
        Self { items }
    }
}

impl RewardResolver for OracleRewardResolver {
    fn resolve(&self, reward: &RewardDescriptor) -> Vec<Item> {
        let resolved = self.items.create(&reward.item, reward.stack);
        if resolved.is_none() {
            tracing::warn!("Reward item {} is not in the item catalog", reward.item);
        }
        resolved.into_iter().collect()
    }
}
