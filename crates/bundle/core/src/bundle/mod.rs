//! Transient bundle views and the donation protocol.
//!
//! A [`Bundle`] projects one [`BundleStore`] record for one participant. It
//! is built when a view opens, mutated by donations, and dropped when the
//! view closes; nothing about it is persisted except what it writes to the
//! store.
//!
//! # Donation protocol
//!
//! 1. Reject with `WrongContext` if the view forbids donations
//! 2. Re-read the store so slots filled by others are seen as filled
//! 3. Find the first open matching slot, or reject with `NoMatch`
//! 4. Compare-and-set the slot in the store
//!    - write failed: `StoreUnavailable`, nothing changes
//!    - someone else won: `RaceLost`, the slot is marked filled locally and
//!      the item is returned whole
//!    - this call won: consume the stack and broadcast the donation
//! 5. Ask the store to mark the bundle complete. Only the donor whose call
//!    marks it starts the completion timer and announces the completion
//!
//! Side effects fire only on step 4's winning branch, so each real donation
//! is reported exactly once across all participants. Local flags can lag
//! behind the store, so step 5 never trusts them to decide completion.

mod criterion;
mod deposit;

pub use criterion::IngredientCriterion;
pub use deposit::{DepositFeedback, DepositOutcome, DepositRejection, DepositResult};

use std::sync::Arc;

use crate::completion::{CompletionState, CompletionStateMachine};
use crate::config::EngineConfig;
use crate::definition::{BundleDefinition, BundleId, IngredientMatch};
use crate::events::BundleEvent;
use crate::item::{Item, ItemOracle};
use crate::matching::{self, MatchOptions};
use crate::notify::NotificationSink;
use crate::store::{BundleStore, StoreError};

/// One participant's live view of a bundle.
#[derive(Clone, Debug)]
pub struct Bundle {
    definition: Arc<BundleDefinition>,
    criteria: Vec<IngredientCriterion>,
    deposits_allowed: bool,
    completion: CompletionStateMachine,
    completion_delay_ms: u64,
    match_options: MatchOptions,
}

impl Bundle {
    /// Opens a view from the store's current record.
    ///
    /// A bundle that is already complete opens in the `Complete` state and
    /// will never emit a celebration.
    ///
    /// # Errors
    ///
    /// Propagates store read failures and layout mismatches.
    pub fn open<S>(
        definition: Arc<BundleDefinition>,
        store: &S,
        deposits_allowed: bool,
        config: &EngineConfig,
    ) -> Result<Self, StoreError>
    where
        S: BundleStore + ?Sized,
    {
        let flags = store.get(definition.id())?;
        Self::from_flags(definition, &flags, deposits_allowed, config)
    }

    /// Builds a view from already fetched flags.
    ///
    /// # Errors
    ///
    /// `LayoutMismatch` if `flags` does not have one entry per ingredient.
    pub fn from_flags(
        definition: Arc<BundleDefinition>,
        flags: &[bool],
        deposits_allowed: bool,
        config: &EngineConfig,
    ) -> Result<Self, StoreError> {
        check_layout(&definition, flags)?;

        let criteria = definition
            .ingredients()
            .iter()
            .zip(flags)
            .map(|(ingredient, filled)| IngredientCriterion::new(ingredient.clone(), *filled))
            .collect();

        let completion = if definition.is_satisfied_by(flags) {
            CompletionStateMachine::loaded_complete()
        } else {
            CompletionStateMachine::open()
        };

        Ok(Self {
            definition,
            criteria,
            deposits_allowed,
            completion,
            completion_delay_ms: config.completion_delay_ms,
            match_options: MatchOptions {
                ignore_stack_count: config.ignore_stack_count,
            },
        })
    }

    pub fn id(&self) -> &BundleId {
        self.definition.id()
    }

    pub fn definition(&self) -> &BundleDefinition {
        &self.definition
    }

    pub fn criteria(&self) -> &[IngredientCriterion] {
        &self.criteria
    }

    pub fn deposits_allowed(&self) -> bool {
        self.deposits_allowed
    }

    pub fn completion_state(&self) -> CompletionState {
        self.completion.state()
    }

    pub fn completed_count(&self) -> usize {
        self.criteria
            .iter()
            .filter(|criterion| criterion.is_completed())
            .count()
    }

    /// True once the required number of slots is filled. Never reverts.
    pub fn is_complete(&self) -> bool {
        self.completed_count() >= self.definition.required_slots()
    }

    /// True if this view allows donations and some slot is still open.
    pub fn can_accept_donations(&self) -> bool {
        self.deposits_allowed && self.criteria.iter().any(|c| !c.is_completed())
    }

    /// Donations still needed to complete the bundle.
    pub fn open_slot_count(&self) -> usize {
        self.definition
            .required_slots()
            .saturating_sub(self.completed_count())
    }

    /// First open slot `item` would fill, without touching the store.
    pub fn find_open_slot(&self, item: &Item) -> Option<usize> {
        matching::find_open_slot(&self.criteria, item, self.match_options)
    }

    /// Re-reads the store and adopts slots filled elsewhere.
    ///
    /// Completion discovered this way is silent.
    ///
    /// # Errors
    ///
    /// Propagates store read failures and layout mismatches.
    pub fn resync<S>(&mut self, store: &S) -> Result<(), StoreError>
    where
        S: BundleStore + ?Sized,
    {
        let flags = store.get(self.id())?;
        self.adopt_flags(&flags)?;
        if self.is_complete() {
            self.completion.resync();
        }
        Ok(())
    }

    fn adopt_flags(&mut self, flags: &[bool]) -> Result<(), StoreError> {
        check_layout(&self.definition, flags)?;
        for (criterion, filled) in self.criteria.iter_mut().zip(flags) {
            if *filled {
                criterion.mark_completed();
            }
        }
        Ok(())
    }

    /// Attempts to donate `item` on behalf of `donor`.
    ///
    /// Never panics and never consumes the item unless this call performed
    /// the store transition. See the module docs for the full protocol.
    pub fn try_deposit<S, N>(
        &mut self,
        item: Item,
        donor: &str,
        store: &S,
        sink: &N,
    ) -> DepositResult
    where
        S: BundleStore + ?Sized,
        N: NotificationSink + ?Sized,
    {
        if !self.deposits_allowed {
            return DepositResult::rejected(item, DepositRejection::WrongContext);
        }

        if let Err(error) = self.resync(store) {
            return DepositResult::rejected(item, DepositRejection::StoreUnavailable(error));
        }

        let Some(slot) = self.find_open_slot(&item) else {
            return DepositResult::rejected(item, DepositRejection::NoMatch);
        };

        match store.try_set(self.id(), slot) {
            Err(error) => DepositResult::rejected(item, DepositRejection::StoreUnavailable(error)),
            Ok(false) => {
                self.criteria[slot].mark_completed();
                if self.is_complete() {
                    self.completion.resync();
                }
                DepositResult::rejected(item, DepositRejection::RaceLost { slot })
            }
            Ok(true) => self.apply_donation(item, donor, slot, store, sink),
        }
    }

    fn apply_donation<S, N>(
        &mut self,
        item: Item,
        donor: &str,
        slot: usize,
        store: &S,
        sink: &N,
    ) -> DepositResult
    where
        S: BundleStore + ?Sized,
        N: NotificationSink + ?Sized,
    {
        let was_complete = self.is_complete();
        self.criteria[slot].mark_completed();

        let bundle = self.id().clone();
        let item_name = item.name.clone();
        let leftover = item.consume(self.criteria[slot].stack());

        let mut events = vec![
            BundleEvent::DonationAccepted {
                bundle: bundle.clone(),
                slot,
            },
            BundleEvent::SlotFilled {
                bundle: bundle.clone(),
                slot,
            },
        ];
        sink.broadcast_donation(donor, &item_name);
        sink.check_achievements(&bundle);

        let completed_bundle = !was_complete && self.claim_completion(store);
        if completed_bundle {
            self.completion.begin(self.completion_delay_ms);
            sink.broadcast_bundle_complete(&bundle);
            events.push(BundleEvent::BundleCompleted { bundle });
        }

        DepositResult {
            leftover,
            outcome: DepositOutcome::Accepted {
                slot,
                completed_bundle,
            },
            events,
        }
    }

    /// Asks the store whether the donation just written completed the bundle.
    ///
    /// A view that loses the claim, or cannot reach the store, reaches
    /// `Complete` silently once its flags show completion.
    fn claim_completion<S>(&mut self, store: &S) -> bool
    where
        S: BundleStore + ?Sized,
    {
        let required = self.definition.required_slots();
        let claimed = matches!(store.try_mark_complete(self.id(), required), Ok(true));

        if let Ok(flags) = store.get(self.id()) {
            // Layout was checked by the resync that preceded the write.
            let _ = self.adopt_flags(&flags);
        }
        if !claimed && self.is_complete() {
            self.completion.resync();
        }
        claimed
    }

    /// Drives the completion timer by `elapsed_ms`.
    ///
    /// Returns `CelebrationStarted` exactly once, when a live completion's
    /// delay runs out.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<BundleEvent> {
        self.completion
            .advance(elapsed_ms)
            .map(|_| BundleEvent::CelebrationStarted {
                bundle: self.id().clone(),
            })
    }

    /// Closes the view. Returns true if a pending celebration was skipped.
    pub fn close(mut self) -> bool {
        self.completion.abandon()
    }

    /// Display item for a slot, at the slot's minimum quality.
    ///
    /// Category slots have no single representative item and return `None`.
    pub fn ingredient_preview<O>(&self, slot: usize, oracle: &O) -> Option<Item>
    where
        O: ItemOracle + ?Sized,
    {
        let criterion = self.criteria.get(slot)?;
        let item = match criterion.matcher() {
            IngredientMatch::Item(id) => oracle.create(id, criterion.stack()),
            IngredientMatch::Flavored(flavor) => {
                oracle.create_flavored(flavor.tag, &flavor.base, criterion.stack())
            }
            IngredientMatch::Category(_) => None,
        }?;
        Some(item.with_quality(criterion.min_quality()))
    }
}

fn check_layout(definition: &BundleDefinition, flags: &[bool]) -> Result<(), StoreError> {
    if flags.len() != definition.slot_count() {
        return Err(StoreError::LayoutMismatch {
            bundle: definition.id().clone(),
            expected: definition.slot_count(),
            found: flags.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{BundleColor, IngredientDefinition};
    use crate::error::{EngineError, ErrorSeverity};
    use crate::item::{Flavor, ItemCategory, ItemDefinition, ItemId, PreserveTag, Quality};
    use crate::testing::{Broadcast, MemoryStore, ReadOnlyStore, RecordingSink, StaleReadStore};

    const SPRING: &str = "Pantry/0";

    fn spring_crops(required: Option<usize>) -> Arc<BundleDefinition> {
        Arc::new(
            BundleDefinition::new(
                BundleId::new(SPRING),
                "Spring Crops",
                BundleColor::Green,
                None,
                vec![
                    IngredientDefinition::item("(O)24", 1),
                    IngredientDefinition::item("(O)192", 1),
                    IngredientDefinition::category(ItemCategory(-75), 1),
                ],
                required,
            )
            .unwrap(),
        )
    }

    fn two_crops() -> Arc<BundleDefinition> {
        Arc::new(
            BundleDefinition::new(
                BundleId::new(SPRING),
                "Spring Crops",
                BundleColor::Green,
                None,
                vec![
                    IngredientDefinition::item("(O)24", 1),
                    IngredientDefinition::item("(O)192", 1),
                ],
                Some(2),
            )
            .unwrap(),
        )
    }

    fn parsnips(stack: u32) -> Item {
        Item::new("(O)24", "Parsnip", ItemCategory(-75)).with_stack(stack)
    }

    fn potato() -> Item {
        Item::new("(O)192", "Potato", ItemCategory(-75))
    }

    fn config() -> EngineConfig {
        EngineConfig::with_completion_delay(800)
    }

    #[test]
    fn spring_crops_scenario() {
        let store = MemoryStore::with_record(SPRING, &[false, false]);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        let first = bundle.try_deposit(parsnips(5), "Abigail", &store, &sink);
        assert_eq!(first.slot(), Some(0));
        assert_eq!(first.leftover.as_ref().map(|item| item.stack), Some(4));
        assert!(!first.completed_bundle());
        assert!(!bundle.is_complete());
        assert_eq!(bundle.open_slot_count(), 1);

        let second = bundle.try_deposit(potato(), "Abigail", &store, &sink);
        assert_eq!(second.slot(), Some(1));
        assert!(second.leftover.is_none());
        assert!(second.completed_bundle());
        assert!(bundle.is_complete());
        assert_eq!(store.flags(SPRING), vec![true, true]);

        assert!(matches!(
            bundle.completion_state(),
            CompletionState::PendingCompletion { .. }
        ));
        assert_eq!(bundle.advance(400), None);
        assert_eq!(
            bundle.advance(400),
            Some(BundleEvent::CelebrationStarted {
                bundle: BundleId::new(SPRING)
            })
        );
        assert_eq!(bundle.advance(400), None);

        let broadcasts = sink.take();
        let completions = broadcasts
            .iter()
            .filter(|b| matches!(b, Broadcast::Complete(_)))
            .count();
        assert_eq!(completions, 1);
        assert!(broadcasts.contains(&Broadcast::Donation {
            donor: "Abigail".into(),
            item: "Parsnip".into()
        }));
    }

    #[test]
    fn accepted_donation_emits_slot_events() {
        let store = MemoryStore::with_record(SPRING, &[false, false]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        let result = bundle.try_deposit(potato(), "Sam", &store, &RecordingSink::default());

        assert_eq!(
            result.events,
            vec![
                BundleEvent::DonationAccepted {
                    bundle: BundleId::new(SPRING),
                    slot: 1
                },
                BundleEvent::SlotFilled {
                    bundle: BundleId::new(SPRING),
                    slot: 1
                },
            ]
        );
    }

    #[test]
    fn wrong_context_is_distinct_and_inert() {
        let store = MemoryStore::with_record(SPRING, &[false, false]);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(two_crops(), &store, false, &config()).unwrap();

        let result = bundle.try_deposit(parsnips(1), "Sam", &store, &sink);

        assert_eq!(result.rejection(), Some(&DepositRejection::WrongContext));
        assert_eq!(
            result.rejection().map(DepositRejection::feedback),
            Some(DepositFeedback::WrongContext)
        );
        assert_eq!(result.leftover, Some(parsnips(1)));
        assert_eq!(store.flags(SPRING), vec![false, false]);
        assert!(sink.take().is_empty());
        assert!(!bundle.can_accept_donations());
    }

    #[test]
    fn no_match_returns_item_unchanged() {
        let store = MemoryStore::with_record(SPRING, &[false, false]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();
        let stone = Item::new("(O)390", "Stone", ItemCategory(-999)).with_stack(20);

        let result = bundle.try_deposit(stone.clone(), "Sam", &store, &RecordingSink::default());

        assert_eq!(result.rejection(), Some(&DepositRejection::NoMatch));
        assert_eq!(result.leftover, Some(stone));
        assert!(result.events.is_empty());
    }

    #[test]
    fn insufficient_quality_is_no_match() {
        let definition = Arc::new(
            BundleDefinition::new(
                BundleId::new("Pantry/3"),
                "Quality Crops",
                BundleColor::Yellow,
                None,
                vec![IngredientDefinition::item("(O)24", 5).with_min_quality(Quality::Gold)],
                None,
            )
            .unwrap(),
        );
        let store = MemoryStore::with_record("Pantry/3", &[false]);
        let mut bundle = Bundle::open(definition, &store, true, &config()).unwrap();

        let silver = parsnips(5).with_quality(Quality::Silver);
        let result = bundle.try_deposit(silver, "Sam", &store, &RecordingSink::default());
        assert_eq!(result.rejection(), Some(&DepositRejection::NoMatch));

        let gold = parsnips(7).with_quality(Quality::Gold);
        let result = bundle.try_deposit(gold, "Sam", &store, &RecordingSink::default());
        assert!(result.is_accepted());
        assert_eq!(result.leftover.map(|item| item.stack), Some(2));
    }

    #[test]
    fn store_failure_rejects_without_local_change() {
        let backing = MemoryStore::with_record(SPRING, &[false, false]);
        let store = ReadOnlyStore(&backing);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        let result = bundle.try_deposit(parsnips(3), "Sam", &store, &sink);

        let rejection = result.rejection().cloned().unwrap();
        assert!(matches!(rejection, DepositRejection::StoreUnavailable(_)));
        assert_eq!(rejection.feedback(), DepositFeedback::NoMatch);
        assert_eq!(rejection.severity(), ErrorSeverity::Recoverable);
        assert_eq!(result.leftover, Some(parsnips(3)));
        assert_eq!(bundle.completed_count(), 0);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn missing_record_rejects_as_store_unavailable() {
        let store = MemoryStore::default();
        let mut bundle = Bundle::from_flags(two_crops(), &[false, false], true, &config()).unwrap();

        let result = bundle.try_deposit(parsnips(1), "Sam", &store, &RecordingSink::default());

        assert_eq!(
            result.rejection(),
            Some(&DepositRejection::StoreUnavailable(StoreError::UnknownBundle(
                BundleId::new(SPRING)
            )))
        );
        assert_eq!(result.leftover, Some(parsnips(1)));
    }

    #[test]
    fn lost_race_keeps_item_and_skips_side_effects() {
        let backing = MemoryStore::with_record(SPRING, &[false, false]);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(two_crops(), &backing, true, &config()).unwrap();

        // Our read sees slot 0 open, but another participant writes it first.
        let stale = StaleReadStore {
            inner: &backing,
            snapshot: vec![false, false],
        };
        backing.fill_remotely(SPRING, 0);

        let result = bundle.try_deposit(parsnips(5), "Sam", &stale, &sink);

        assert_eq!(result.rejection(), Some(&DepositRejection::RaceLost { slot: 0 }));
        assert_eq!(
            result.rejection().map(DepositRejection::feedback),
            Some(DepositFeedback::AlreadyProvided)
        );
        assert_eq!(result.leftover, Some(parsnips(5)));
        assert!(result.events.is_empty());
        assert!(sink.take().is_empty());
        assert!(bundle.criteria()[0].is_completed());
    }

    #[test]
    fn donations_to_different_slots_complete_once() {
        let store = MemoryStore::with_record(SPRING, &[true, false, false]);
        let sink = RecordingSink::default();
        let mut alice = Bundle::open(spring_crops(Some(2)), &store, true, &config()).unwrap();
        let mut bob = Bundle::open(spring_crops(Some(2)), &store, true, &config()).unwrap();

        // Alice read the record before Bob's write to the category slot landed.
        let stale = StaleReadStore {
            inner: &store,
            snapshot: vec![true, false, false],
        };
        let cauliflower = Item::new("(O)190", "Cauliflower", ItemCategory(-75));
        let bob_result = bob.try_deposit(cauliflower, "Bob", &store, &sink);
        let alice_result = alice.try_deposit(potato(), "Alice", &stale, &sink);

        assert_eq!(bob_result.slot(), Some(2));
        assert_eq!(alice_result.slot(), Some(1));
        assert!(bob_result.completed_bundle());
        assert!(!alice_result.completed_bundle());
        assert!(!alice_result
            .events
            .iter()
            .any(|event| matches!(event, BundleEvent::BundleCompleted { .. })));
        assert_eq!(store.flags(SPRING), vec![true, true, true]);

        assert!(alice.is_complete());
        assert_eq!(alice.completion_state(), CompletionState::Complete);
        assert_eq!(alice.advance(10_000), None);
        assert!(bob.advance(10_000).is_some());

        let completions = sink
            .take()
            .into_iter()
            .filter(|b| matches!(b, Broadcast::Complete(_)))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn completion_recorded_elsewhere_is_silent() {
        let backing = MemoryStore::with_record(SPRING, &[true, false]);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(two_crops(), &backing, true, &config()).unwrap();

        // Another participant already recorded the completion.
        backing.try_mark_complete(&BundleId::new(SPRING), 1).unwrap();
        let result = bundle.try_deposit(potato(), "Sam", &backing, &sink);

        assert!(result.is_accepted());
        assert!(!result.completed_bundle());
        assert_eq!(bundle.completion_state(), CompletionState::Complete);
        assert!(!sink.take().contains(&Broadcast::Complete(BundleId::new(SPRING))));
    }

    #[test]
    fn rereads_store_before_choosing_slot() {
        let store = MemoryStore::with_record(SPRING, &[false, false]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        store.fill_remotely(SPRING, 0);
        let result = bundle.try_deposit(parsnips(1), "Sam", &store, &RecordingSink::default());

        assert_eq!(result.rejection(), Some(&DepositRejection::NoMatch));
        assert!(bundle.criteria()[0].is_completed());
    }

    #[test]
    fn remote_completion_is_silent() {
        let store = MemoryStore::with_record(SPRING, &[true, false]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        store.fill_remotely(SPRING, 1);
        bundle.resync(&store).unwrap();

        assert!(bundle.is_complete());
        assert_eq!(bundle.completion_state(), CompletionState::Complete);
        assert_eq!(bundle.advance(10_000), None);
    }

    #[test]
    fn loaded_complete_bundle_never_celebrates() {
        let store = MemoryStore::with_record(SPRING, &[true, true]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        assert!(bundle.is_complete());
        assert_eq!(bundle.completion_state(), CompletionState::Complete);
        assert_eq!(bundle.advance(10_000), None);
        assert!(!bundle.can_accept_donations());
        assert_eq!(bundle.open_slot_count(), 0);
    }

    #[test]
    fn partial_completion_counts_any_slots() {
        let store = MemoryStore::with_record(SPRING, &[false, false, false]);
        let sink = RecordingSink::default();
        let mut bundle = Bundle::open(spring_crops(Some(2)), &store, true, &config()).unwrap();

        // Potato goes to slot 1, then a second potato falls through to the category slot.
        assert_eq!(bundle.try_deposit(potato(), "Sam", &store, &sink).slot(), Some(1));
        assert!(!bundle.is_complete());

        let result = bundle.try_deposit(potato(), "Sam", &store, &sink);
        assert_eq!(result.slot(), Some(2));
        assert!(result.completed_bundle());
        assert!(bundle.is_complete());

        // Slot 0 stays open; donating into it is accepted but changes nothing.
        assert!(bundle.can_accept_donations());
        let late = bundle.try_deposit(parsnips(1), "Sam", &store, &sink);
        assert_eq!(late.slot(), Some(0));
        assert!(!late.completed_bundle());
        assert!(bundle.is_complete());

        let completions = sink
            .take()
            .into_iter()
            .filter(|b| matches!(b, Broadcast::Complete(_)))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn ignore_stack_count_consumes_whole_stack() {
        let definition = Arc::new(
            BundleDefinition::new(
                BundleId::new("Pantry/4"),
                "Bulk",
                BundleColor::Orange,
                None,
                vec![IngredientDefinition::item("(O)24", 10)],
                None,
            )
            .unwrap(),
        );
        let store = MemoryStore::with_record("Pantry/4", &[false]);
        let relaxed = EngineConfig {
            ignore_stack_count: true,
            ..EngineConfig::default()
        };
        let mut bundle = Bundle::open(definition, &store, true, &relaxed).unwrap();

        let result = bundle.try_deposit(parsnips(3), "Sam", &store, &RecordingSink::default());

        assert!(result.is_accepted());
        assert!(result.leftover.is_none());
    }

    #[test]
    fn close_while_pending_skips_celebration_only() {
        let store = MemoryStore::with_record(SPRING, &[true, false]);
        let mut bundle = Bundle::open(two_crops(), &store, true, &config()).unwrap();

        let result = bundle.try_deposit(potato(), "Sam", &store, &RecordingSink::default());
        assert!(result.completed_bundle());

        assert!(bundle.close());
        assert_eq!(store.flags(SPRING), vec![true, true]);
    }

    #[test]
    fn open_rejects_mismatched_layout() {
        let store = MemoryStore::with_record(SPRING, &[false]);
        let error = Bundle::open(two_crops(), &store, true, &config()).unwrap_err();

        assert_eq!(
            error,
            StoreError::LayoutMismatch {
                bundle: BundleId::new(SPRING),
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(error.error_code(), "STORE_LAYOUT_MISMATCH");
    }

    struct PreviewOracle;

    impl ItemOracle for PreviewOracle {
        fn definition(&self, id: &ItemId) -> Option<ItemDefinition> {
            match id.as_str() {
                "(O)24" => Some(ItemDefinition::new("(O)24", "Parsnip", ItemCategory(-75))),
                "(O)258" => Some(ItemDefinition::new("(O)258", "Blueberry", ItemCategory(-79))),
                _ => None,
            }
        }

        fn create_flavored(&self, tag: PreserveTag, base: &ItemId, stack: u32) -> Option<Item> {
            let base_definition = self.definition(base)?;
            Some(
                Item::new(
                    "(O)344",
                    tag.flavored_name(&base_definition.name),
                    ItemCategory(-26),
                )
                .with_stack(stack)
                .with_flavor(Flavor::new(tag, base.clone())),
            )
        }
    }

    #[test]
    fn previews_follow_match_mode() {
        let definition = Arc::new(
            BundleDefinition::new(
                BundleId::new("Pantry/5"),
                "Artisan",
                BundleColor::Purple,
                None,
                vec![
                    IngredientDefinition::item("(O)24", 3).with_min_quality(Quality::Gold),
                    IngredientDefinition::flavored(Flavor::new(PreserveTag::Jelly, "(O)258"), 1),
                    IngredientDefinition::category(ItemCategory(-5), 1),
                ],
                None,
            )
            .unwrap(),
        );
        let bundle =
            Bundle::from_flags(definition, &[false, false, false], true, &config()).unwrap();

        let parsnip = bundle.ingredient_preview(0, &PreviewOracle).unwrap();
        assert_eq!(parsnip.stack, 3);
        assert_eq!(parsnip.quality, Quality::Gold);

        let jelly = bundle.ingredient_preview(1, &PreviewOracle).unwrap();
        assert_eq!(jelly.name, "Blueberry Jelly");

        assert!(bundle.ingredient_preview(2, &PreviewOracle).is_none());
        assert!(bundle.ingredient_preview(9, &PreviewOracle).is_none());
    }
}
