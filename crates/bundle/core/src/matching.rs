//! Donation matching predicate.
//!
//! Matching is pure: given a candidate item and the ordered criteria of a
//! bundle, it decides which slot (if any) the item fills. It never mutates.
//!
//! # Rules
//!
//! A criterion recognizes an item through exactly one mode:
//! 1. **Flavored**: the item is the criterion's preserve variant of the criterion's base
//! 2. **Category**: the item's category equals the criterion's (see [`CATEGORY_EXEMPTIONS`])
//! 3. **Item**: the item's id equals the criterion's
//!
//! In every mode the criterion must still be open, the item quality must reach
//! the criterion's floor, and the stack must cover the required amount unless
//! [`MatchOptions::ignore_stack_count`] is set.
//!
//! [`find_open_slot`] returns the *first* eligible slot in declaration order.
//! There is no best-fit search.

use crate::bundle::IngredientCriterion;
use crate::definition::{IngredientDefinition, IngredientMatch};
use crate::item::{Item, ItemCategory};

/// An item accepted by a category criterion it does not belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryExemption {
    pub item: &'static str,
    pub category: ItemCategory,
}

/// Hardcoded category substitutions, preserved as-is from shipped content.
pub const CATEGORY_EXEMPTIONS: &[CategoryExemption] = &[CategoryExemption {
    item: "(O)107",
    category: ItemCategory(-5),
}];

/// Knobs that relax matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub ignore_stack_count: bool,
}

fn is_exempt(item: &Item, category: ItemCategory) -> bool {
    CATEGORY_EXEMPTIONS
        .iter()
        .any(|exemption| exemption.category == category && exemption.item == item.id.as_str())
}

/// Returns true if `item` is the kind of thing `ingredient` asks for and is good enough.
///
/// Ignores completion state and stack size.
pub fn satisfies(item: &Item, ingredient: &IngredientDefinition) -> bool {
    if item.quality < ingredient.min_quality {
        return false;
    }

    match &ingredient.matcher {
        IngredientMatch::Flavored(flavor) => item.flavor.as_ref() == Some(flavor),
        IngredientMatch::Category(category) => {
            is_exempt(item, *category) || item.category == *category
        }
        IngredientMatch::Item(id) => item.id == *id,
    }
}

/// Full eligibility check for one open slot.
pub fn matches(item: &Item, criterion: &IngredientCriterion, options: MatchOptions) -> bool {
    if criterion.is_completed() {
        return false;
    }
    if !options.ignore_stack_count && item.stack < criterion.stack() {
        return false;
    }
    satisfies(item, criterion.definition())
}

/// Index of the first open criterion `item` can fill.
pub fn find_open_slot(
    criteria: &[IngredientCriterion],
    item: &Item,
    options: MatchOptions,
) -> Option<usize> {
    criteria
        .iter()
        .position(|criterion| matches(item, criterion, options))
}
