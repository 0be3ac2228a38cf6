//! Typed bundle definitions.
//!
//! Definitions are built once at content-load time and validated there. The
//! runtime engine only ever sees a [`BundleDefinition`] that already satisfies
//! its invariants, so donation code never re-checks content shape.

use crate::error::{EngineError, ErrorSeverity};
use crate::item::{Flavor, ItemCategory, ItemId, Quality};

/// Stable key of a bundle inside the shared store, e.g. `Pantry/0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BundleId(String);

impl BundleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BundleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BundleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Presentation color of a bundle. Opaque to the engine.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BundleColor {
    #[default]
    Green,
    Purple,
    Orange,
    Yellow,
    Red,
    Blue,
    Teal,
}

/// What a completed bundle pays out. Resolved on demand by a
/// [`RewardResolver`](crate::RewardResolver), never on the donation path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardDescriptor {
    pub item: ItemId,
    pub stack: u32,
}

impl RewardDescriptor {
    pub fn new(item: impl Into<ItemId>, stack: u32) -> Self {
        Self {
            item: item.into(),
            stack,
        }
    }
}

/// How a slot recognizes an acceptable item.
///
/// Exactly one mode per slot; the enum makes a second mode unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IngredientMatch {
    /// A specific item id.
    Item(ItemId),
    /// Any item of this category.
    Category(ItemCategory),
    /// A flavored variant of a base item, e.g. Blueberry Jelly.
    Flavored(Flavor),
}

impl IngredientMatch {
    /// Builds a match mode from optional parts, as found in raw content.
    ///
    /// # Errors
    ///
    /// `NoMatchMode` if no part is set, `ConflictingMatchModes` if more than one is.
    pub fn from_parts(
        bundle: &BundleId,
        slot: usize,
        item: Option<ItemId>,
        category: Option<ItemCategory>,
        flavor: Option<Flavor>,
    ) -> Result<Self, DefinitionError> {
        let modes =
            usize::from(item.is_some()) + usize::from(category.is_some()) + usize::from(flavor.is_some());
        if modes > 1 {
            return Err(DefinitionError::ConflictingMatchModes {
                bundle: bundle.clone(),
                slot,
                modes,
            });
        }

        match (item, category, flavor) {
            (Some(item), None, None) => Ok(Self::Item(item)),
            (None, Some(category), None) => Ok(Self::Category(category)),
            (None, None, Some(flavor)) => Ok(Self::Flavored(flavor)),
            _ => Err(DefinitionError::NoMatchMode {
                bundle: bundle.clone(),
                slot,
            }),
        }
    }
}

/// One slot's matching rule as declared in content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IngredientDefinition {
    pub matcher: IngredientMatch,
    /// Amount consumed per donation.
    pub stack: u32,
    pub min_quality: Quality,
}

impl IngredientDefinition {
    pub fn new(matcher: IngredientMatch, stack: u32, min_quality: Quality) -> Self {
        Self {
            matcher,
            stack,
            min_quality,
        }
    }

    pub fn item(id: impl Into<ItemId>, stack: u32) -> Self {
        Self::new(IngredientMatch::Item(id.into()), stack, Quality::Normal)
    }

    pub fn category(category: ItemCategory, stack: u32) -> Self {
        Self::new(IngredientMatch::Category(category), stack, Quality::Normal)
    }

    pub fn flavored(flavor: Flavor, stack: u32) -> Self {
        Self::new(IngredientMatch::Flavored(flavor), stack, Quality::Normal)
    }

    #[must_use]
    pub fn with_min_quality(mut self, min_quality: Quality) -> Self {
        self.min_quality = min_quality;
        self
    }
}

/// Validated bundle content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BundleDefinition {
    id: BundleId,
    label: String,
    color: BundleColor,
    reward: Option<RewardDescriptor>,
    ingredients: Vec<IngredientDefinition>,
    required_slots: usize,
}

impl BundleDefinition {
    /// Builds a definition, enforcing every load-time invariant.
    ///
    /// `required_slots = None` means every ingredient must be donated.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found.
    pub fn new(
        id: BundleId,
        label: impl Into<String>,
        color: BundleColor,
        reward: Option<RewardDescriptor>,
        ingredients: Vec<IngredientDefinition>,
        required_slots: Option<usize>,
    ) -> Result<Self, DefinitionError> {
        if id.as_str().trim().is_empty() {
            return Err(DefinitionError::EmptyBundleId);
        }
        if ingredients.is_empty() {
            return Err(DefinitionError::NoIngredients { bundle: id });
        }

        let required_slots = required_slots.unwrap_or(ingredients.len());
        if required_slots == 0 || required_slots > ingredients.len() {
            return Err(DefinitionError::InvalidRequiredSlots {
                bundle: id,
                required: required_slots,
                available: ingredients.len(),
            });
        }

        for (slot, ingredient) in ingredients.iter().enumerate() {
            if ingredient.stack == 0 {
                return Err(DefinitionError::ZeroStack { bundle: id, slot });
            }
            let empty_id = match &ingredient.matcher {
                IngredientMatch::Item(item) => item.is_empty(),
                IngredientMatch::Flavored(flavor) => flavor.base.is_empty(),
                IngredientMatch::Category(_) => false,
            };
            if empty_id {
                return Err(DefinitionError::EmptyItemId { bundle: id, slot });
            }
        }

        if let Some(reward) = &reward
            && (reward.item.is_empty() || reward.stack == 0)
        {
            return Err(DefinitionError::InvalidReward { bundle: id });
        }

        Ok(Self {
            id,
            label: label.into(),
            color,
            reward,
            ingredients,
            required_slots,
        })
    }

    pub fn id(&self) -> &BundleId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> BundleColor {
        self.color
    }

    pub fn reward(&self) -> Option<&RewardDescriptor> {
        self.reward.as_ref()
    }

    pub fn ingredients(&self) -> &[IngredientDefinition] {
        &self.ingredients
    }

    /// Number of slots in the store record. Fixed for the life of the save.
    pub fn slot_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Donations needed to complete the bundle. Never above [`Self::slot_count`].
    pub fn required_slots(&self) -> usize {
        self.required_slots
    }

    /// Returns true if `flags` describe a complete bundle.
    pub fn is_satisfied_by(&self, flags: &[bool]) -> bool {
        flags.iter().filter(|filled| **filled).count() >= self.required_slots
    }
}

/// Malformed content detected at load time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionError {
    #[error("bundle id must not be empty")]
    EmptyBundleId,

    #[error("bundle {bundle} declares no ingredients")]
    NoIngredients { bundle: BundleId },

    #[error("bundle {bundle} requires {required} slots but declares {available}")]
    InvalidRequiredSlots {
        bundle: BundleId,
        required: usize,
        available: usize,
    },

    #[error("bundle {bundle} slot {slot} has no matching mode")]
    NoMatchMode { bundle: BundleId, slot: usize },

    #[error("bundle {bundle} slot {slot} sets {modes} matching modes, expected exactly one")]
    ConflictingMatchModes {
        bundle: BundleId,
        slot: usize,
        modes: usize,
    },

    #[error("bundle {bundle} slot {slot} requires a stack of zero")]
    ZeroStack { bundle: BundleId, slot: usize },

    #[error("bundle {bundle} slot {slot} names an empty item id")]
    EmptyItemId { bundle: BundleId, slot: usize },

    #[error("bundle {bundle} has an invalid reward")]
    InvalidReward { bundle: BundleId },

    #[error("bundle {0} is defined more than once")]
    DuplicateBundle(BundleId),
}

impl EngineError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use DefinitionError::*;
        match self {
            EmptyBundleId => "DEFINITION_EMPTY_BUNDLE_ID",
            NoIngredients { .. } => "DEFINITION_NO_INGREDIENTS",
            InvalidRequiredSlots { .. } => "DEFINITION_INVALID_REQUIRED_SLOTS",
            NoMatchMode { .. } => "DEFINITION_NO_MATCH_MODE",
            ConflictingMatchModes { .. } => "DEFINITION_CONFLICTING_MATCH_MODES",
            ZeroStack { .. } => "DEFINITION_ZERO_STACK",
            EmptyItemId { .. } => "DEFINITION_EMPTY_ITEM_ID",
            InvalidReward { .. } => "DEFINITION_INVALID_REWARD",
            DuplicateBundle(_) => "DEFINITION_DUPLICATE_BUNDLE",
        }
    }
}
