use crate::definition::{IngredientDefinition, IngredientMatch};
use crate::item::Quality;

/// A slot's matching rule plus whether it has been filled.
///
/// `completed` only ever flips from `false` to `true`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IngredientCriterion {
    definition: IngredientDefinition,
    completed: bool,
}

impl IngredientCriterion {
    pub fn new(definition: IngredientDefinition, completed: bool) -> Self {
        Self {
            definition,
            completed,
        }
    }

    pub fn definition(&self) -> &IngredientDefinition {
        &self.definition
    }

    pub fn matcher(&self) -> &IngredientMatch {
        &self.definition.matcher
    }

    pub fn stack(&self) -> u32 {
        self.definition.stack
    }

    pub fn min_quality(&self) -> Quality {
        self.definition.min_quality
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns true if this call filled the slot.
    pub(crate) fn mark_completed(&mut self) -> bool {
        let newly = !self.completed;
        self.completed = true;
        newly
    }
}
