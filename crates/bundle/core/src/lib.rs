//! Deterministic donation engine shared by every participant.
//!
//! `bundle-core` defines the canonical donation rules: item criteria, the
//! matching predicate, the slot-filling protocol and the completion state
//! machine. It owns no durable state. The shared slot table lives behind
//! [`BundleStore`], broadcasts go through [`NotificationSink`], and item
//! construction goes through [`ItemOracle`]; runtimes supply all three.
//!
//! A [`Bundle`] is a transient projection of one store record. Open it,
//! deposit items into it, drive its timer with [`Bundle::advance`], and drop
//! it when the view closes.
pub mod bundle;
pub mod completion;
pub mod config;
pub mod definition;
pub mod error;
pub mod events;
pub mod item;
pub mod matching;
pub mod notify;
pub mod reward;
pub mod store;

#[cfg(test)]
mod testing;

pub use bundle::{
    Bundle, DepositFeedback, DepositOutcome, DepositRejection, DepositResult, IngredientCriterion,
};
pub use completion::{CompletionCue, CompletionState, CompletionStateMachine};
pub use config::EngineConfig;
pub use definition::{
    BundleColor, BundleDefinition, BundleId, DefinitionError, IngredientDefinition,
    IngredientMatch, RewardDescriptor,
};
pub use error::{EngineError, ErrorSeverity};
pub use events::BundleEvent;
pub use item::{Flavor, Item, ItemCategory, ItemDefinition, ItemId, ItemOracle, PreserveTag, Quality};
pub use matching::{CATEGORY_EXEMPTIONS, CategoryExemption, MatchOptions};
pub use notify::{NotificationSink, NullSink};
pub use reward::RewardResolver;
pub use store::{BundleStore, RewardLedger, StoreError};
