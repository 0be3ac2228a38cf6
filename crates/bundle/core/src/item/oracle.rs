use super::{Item, ItemCategory, ItemId, PreserveTag};

/// Builds item instances for previews and rewards.
///
/// The donation path never calls the oracle: candidates arrive fully formed.
/// It is used to show what a slot wants and to hand out rewards.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &ItemId) -> Option<ItemDefinition>;

    /// Creates `stack` plain items of `id`.
    fn create(&self, id: &ItemId, stack: u32) -> Option<Item> {
        self.definition(id)
            .map(|definition| definition.instantiate().with_stack(stack))
    }

    /// Creates the `tag` variant of `base`, e.g. Blueberry Jelly.
    ///
    /// Returns `None` if either the base item or the preserve product is unknown.
    fn create_flavored(&self, tag: PreserveTag, base: &ItemId, stack: u32) -> Option<Item>;
}

/// Static description of an item kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "uncategorized"))]
    pub category: ItemCategory,
}

#[cfg(feature = "serde")]
fn uncategorized() -> ItemCategory {
    ItemCategory::NONE
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
        }
    }

    /// Creates a single normal-quality instance.
    pub fn instantiate(&self) -> Item {
        Item::new(self.id.clone(), self.name.clone(), self.category)
    }
}
