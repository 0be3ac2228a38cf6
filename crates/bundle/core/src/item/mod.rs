//! Item types seen by the donation engine.
//!
//! The engine never manipulates inventories. It only needs to know what a
//! candidate item *is* (identity, category, flavor), how good it is
//! (quality) and how many are held (stack).

mod oracle;

pub use oracle::{ItemDefinition, ItemOracle};

/// Qualified item identifier, e.g. `(O)24`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Item category code. Categories are negative; `0` means uncategorized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemCategory(pub i32);

impl ItemCategory {
    pub const NONE: Self = Self(0);
}

impl core::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item quality ladder.
///
/// Declaration order is the comparison order, so `Quality::Gold >= Quality::Silver`.
/// Raw values skip `3`, matching persisted save data.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Quality {
    #[default]
    Normal,
    Silver,
    Gold,
    Iridium,
}

impl Quality {
    pub const fn raw(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Silver => 1,
            Self::Gold => 2,
            Self::Iridium => 4,
        }
    }

    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Normal),
            1 => Some(Self::Silver),
            2 => Some(Self::Gold),
            4 => Some(Self::Iridium),
            _ => None,
        }
    }
}

/// Processing applied to a base ingredient to produce a flavored variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PreserveTag {
    Wine,
    Jelly,
    Pickles,
    Juice,
    Roe,
    AgedRoe,
    Honey,
    DriedFruit,
    DriedMushroom,
    SmokedFish,
    Bait,
}

impl PreserveTag {
    /// Display name of the flavored variant made from `base_name`.
    pub fn flavored_name(self, base_name: &str) -> String {
        match self {
            Self::Wine => format!("{base_name} Wine"),
            Self::Jelly => format!("{base_name} Jelly"),
            Self::Pickles => format!("Pickled {base_name}"),
            Self::Juice => format!("{base_name} Juice"),
            Self::Roe => format!("{base_name} Roe"),
            Self::AgedRoe => format!("Aged {base_name} Roe"),
            Self::Honey => format!("{base_name} Honey"),
            Self::DriedFruit | Self::DriedMushroom => format!("Dried {base_name}"),
            Self::SmokedFish => format!("Smoked {base_name}"),
            Self::Bait => format!("{base_name} Bait"),
        }
    }
}

/// Marks an item as a flavored variant of `base`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flavor {
    pub tag: PreserveTag,
    pub base: ItemId,
}

impl Flavor {
    pub fn new(tag: PreserveTag, base: impl Into<ItemId>) -> Self {
        Self {
            tag,
            base: base.into(),
        }
    }
}

/// A concrete stack of items offered for donation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub quality: Quality,
    pub stack: u32,
    pub flavor: Option<Flavor>,
}

impl Item {
    /// Creates a single normal-quality item.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            quality: Quality::Normal,
            stack: 1,
            flavor: None,
        }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: u32) -> Self {
        self.stack = stack;
        self
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// Removes `amount` from the stack, returning what is left (if anything).
    pub fn consume(mut self, amount: u32) -> Option<Self> {
        self.stack = self.stack.saturating_sub(amount);
        (self.stack > 0).then_some(self)
    }
}
