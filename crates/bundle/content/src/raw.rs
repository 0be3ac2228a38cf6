//! Raw content formats as they appear in data files.
//!
//! Raw specs are permissive on purpose: an ingredient may name zero or
//! several matching modes here. [`BundleSpec::into_definition`] is the single
//! place where such content is rejected.

use std::collections::HashSet;

use bundle_core::{
    BundleColor, BundleDefinition, BundleId, DefinitionError, Flavor, IngredientDefinition,
    IngredientMatch, ItemCategory, ItemDefinition, ItemId, PreserveTag, Quality, RewardDescriptor,
};
use serde::{Deserialize, Serialize};

/// Bundle catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleCatalog {
    pub bundles: Vec<BundleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub color: BundleColor,
    #[serde(default)]
    pub reward: Option<RewardDescriptor>,
    pub ingredients: Vec<IngredientSpec>,
    /// Omitted means every ingredient is required.
    #[serde(default)]
    pub required_slots: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientSpec {
    #[serde(default)]
    pub item: Option<ItemId>,
    #[serde(default)]
    pub category: Option<ItemCategory>,
    #[serde(default)]
    pub flavor: Option<Flavor>,
    #[serde(default = "single")]
    pub stack: u32,
    #[serde(default)]
    pub quality: Quality,
}

fn single() -> u32 {
    1
}

impl BundleSpec {
    /// Validates and converts this spec.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] in declaration order.
    pub fn into_definition(self) -> Result<BundleDefinition, DefinitionError> {
        let id = BundleId::new(self.id);

        let ingredients = self
            .ingredients
            .into_iter()
            .enumerate()
            .map(|(slot, ingredient)| {
                let matcher = IngredientMatch::from_parts(
                    &id,
                    slot,
                    ingredient.item,
                    ingredient.category,
                    ingredient.flavor,
                )?;
                Ok(IngredientDefinition::new(
                    matcher,
                    ingredient.stack,
                    ingredient.quality,
                ))
            })
            .collect::<Result<Vec<_>, DefinitionError>>()?;

        BundleDefinition::new(
            id,
            self.label,
            self.color,
            self.reward,
            ingredients,
            self.required_slots,
        )
    }
}

/// Converts a whole catalog, collecting every error instead of stopping at the first.
///
/// # Errors
///
/// All definition errors, including duplicated bundle ids, in catalog order.
pub fn build_definitions(
    specs: Vec<BundleSpec>,
) -> Result<Vec<BundleDefinition>, Vec<DefinitionError>> {
    let mut seen = HashSet::new();
    let mut definitions = Vec::with_capacity(specs.len());
    let mut errors = Vec::new();

    for spec in specs {
        if !seen.insert(spec.id.clone()) {
            errors.push(DefinitionError::DuplicateBundle(BundleId::new(spec.id)));
            continue;
        }
        match spec.into_definition() {
            Ok(definition) => definitions.push(definition),
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(definitions)
    } else {
        Err(errors)
    }
}

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
    /// Which item a preserve process produces, e.g. Jelly → `(O)344`.
    #[serde(default)]
    pub preserves: Vec<PreserveProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreserveProduct {
    pub tag: PreserveTag,
    pub output: ItemId,
}
