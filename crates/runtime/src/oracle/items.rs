//! [`bundle_core::ItemOracle`] backed by an in-memory map.
use std::collections::HashMap;

use bundle_content::ItemCatalog;
use bundle_core::{Flavor, Item, ItemDefinition, ItemId, ItemOracle, PreserveTag};

/// ItemOracle implementation with static item definitions
pub struct ItemOracleImpl {
    definitions: HashMap<ItemId, ItemDefinition>,
    preserves: HashMap<PreserveTag, ItemId>,
}

impl ItemOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
            preserves: HashMap::new(),
        }
    }

    /// Builds an oracle from a loaded item catalog.
    pub fn from_catalog(catalog: ItemCatalog) -> Self {
        let mut oracle = Self::new();
        for definition in catalog.items {
            oracle.add_definition(definition);
        }
        for product in catalog.preserves {
            oracle.add_preserve(product.tag, product.output);
        }
        oracle
    }

    /// Add an item definition
    pub fn add_definition(&mut self, def: ItemDefinition) {
        self.definitions.insert(def.id.clone(), def);
    }

    /// Register which item a preserve process produces.
    pub fn add_preserve(&mut self, tag: PreserveTag, output: ItemId) {
        self.preserves.insert(tag, output);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, id: &ItemId) -> Option<ItemDefinition> {
        self.definitions.get(id).cloned()
    }

    fn create_flavored(&self, tag: PreserveTag, base: &ItemId, stack: u32) -> Option<Item> {
        let output = self.definitions.get(self.preserves.get(&tag)?)?;
        let base_definition = self.definitions.get(base)?;

        Some(
            Item::new(
                output.id.clone(),
                tag.flavored_name(&base_definition.name),
                output.category,
            )
            .with_stack(stack)
            .with_flavor(Flavor::new(tag, base.clone())),
        )
    }
}
