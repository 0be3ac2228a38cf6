//! Board-wide coordinator shared by every participant.
//!
//! The board owns the validated definitions, the shared store, the
//! notification sink and the engine config. It registers one store record
//! per bundle when it is built, opens [`Bundle`] views for participants, and
//! runs every donation through the engine so outcomes are logged and
//! milestones are announced in one place.

use std::collections::BTreeMap;
use std::sync::Arc;

use bundle_core::{
    Bundle, BundleDefinition, BundleEvent, BundleId, DefinitionError, DepositOutcome,
    DepositRejection, DepositResult, EngineConfig, Item, NotificationSink, NullSink,
    RewardResolver,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus};
use crate::repository::{BundleRepository, InMemoryBundleStore};
use crate::session::ParticipantSession;

/// Runtime configuration shared across the board and its sessions.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            event_buffer_size: 100,
        }
    }
}

/// Shared coordinator for one set of bundles.
///
/// Wrap it in an [`Arc`] and hand one [`ParticipantSession`] to each
/// participant.
pub struct BundleBoard {
    config: RuntimeConfig,
    definitions: BTreeMap<BundleId, Arc<BundleDefinition>>,
    store: Arc<dyn BundleRepository>,
    sink: Arc<dyn NotificationSink>,
    rewards: Option<Arc<dyn RewardResolver>>,
    events: Option<EventBus>,
}

impl BundleBoard {
    /// Create a new board builder
    pub fn builder() -> BundleBoardBuilder {
        BundleBoardBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn definition(&self, bundle: &BundleId) -> Option<&Arc<BundleDefinition>> {
        self.definitions.get(bundle)
    }

    /// Definitions in bundle id order.
    pub fn definitions(&self) -> impl Iterator<Item = &BundleDefinition> {
        self.definitions.values().map(Arc::as_ref)
    }

    pub fn store(&self) -> &dyn BundleRepository {
        self.store.as_ref()
    }

    /// The bus presentation events are published on, if one was configured.
    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Starts a session for `participant`.
    pub fn session(self: &Arc<Self>, participant: impl Into<String>) -> ParticipantSession {
        ParticipantSession::new(Arc::clone(self), participant)
    }

    /// Opens a fresh view of `bundle` from the store's current record.
    pub fn open_view(&self, bundle: &BundleId, deposits_allowed: bool) -> Result<Bundle> {
        let definition = self
            .definitions
            .get(bundle)
            .ok_or_else(|| RuntimeError::UnknownBundle(bundle.clone()))?;

        let view = Bundle::open(
            Arc::clone(definition),
            self.store.as_ref(),
            deposits_allowed,
            &self.config.engine,
        )?;

        tracing::debug!(
            bundle = %bundle,
            deposits_allowed,
            completed = view.completed_count(),
            "Opened bundle view"
        );
        Ok(view)
    }

    /// Runs one donation through `view` on behalf of `donor`.
    ///
    /// Rejections are part of the returned result, never an error.
    pub fn deposit(&self, view: &mut Bundle, item: Item, donor: &str) -> DepositResult {
        let bundle = view.id().clone();
        tracing::debug!(
            bundle = %bundle,
            donor,
            item = %item.id,
            stack = item.stack,
            "Deposit attempt"
        );

        let result = view.try_deposit(item, donor, self.store.as_ref(), self.sink.as_ref());

        match &result.outcome {
            DepositOutcome::Accepted {
                slot,
                completed_bundle,
            } => {
                tracing::info!(bundle = %bundle, donor, slot, "Donation accepted");
                if *completed_bundle {
                    tracing::info!(bundle = %bundle, "Bundle completed");
                    self.announce_milestone();
                }
            }
            DepositOutcome::Rejected(DepositRejection::StoreUnavailable(error)) => {
                tracing::warn!(bundle = %bundle, donor, "Store unavailable: {}", error);
            }
            DepositOutcome::Rejected(DepositRejection::RaceLost { slot }) => {
                tracing::warn!(bundle = %bundle, donor, slot, "Lost race for slot");
            }
            DepositOutcome::Rejected(rejection) => {
                tracing::debug!(bundle = %bundle, donor, "Deposit rejected: {}", rejection);
            }
        }

        self.publish(&result.events);
        result
    }

    /// Publishes presentation events on the bus, if any.
    pub(crate) fn publish(&self, events: &[BundleEvent]) {
        if let Some(bus) = &self.events {
            for event in events {
                bus.publish(Event::Presentation(event.clone()));
            }
        }
    }

    /// True if the store record of `bundle` satisfies its definition.
    pub fn is_complete(&self, bundle: &BundleId) -> Result<bool> {
        let definition = self
            .definitions
            .get(bundle)
            .ok_or_else(|| RuntimeError::UnknownBundle(bundle.clone()))?;
        let flags = self.store.get(bundle)?;
        Ok(definition.is_satisfied_by(&flags))
    }

    /// Number of bundles whose store record is complete.
    pub fn completed_bundle_count(&self) -> Result<usize> {
        let mut completed = 0;
        for bundle in self.definitions.keys() {
            if self.is_complete(bundle)? {
                completed += 1;
            }
        }
        Ok(completed)
    }

    /// Broadcasts the milestone at the current completed count, if any.
    ///
    /// The ledger claim makes the announcement once-only across boards
    /// sharing a store.
    fn announce_milestone(&self) {
        let completed = match self.completed_bundle_count() {
            Ok(completed) => completed,
            Err(error) => {
                tracing::warn!("Skipped milestone check: {}", error);
                return;
            }
        };
        if !self.config.engine.is_milestone(completed) {
            return;
        }

        match self.store.try_claim_milestone(completed) {
            Ok(true) => {
                tracing::info!(completed, "Milestone reached");
                self.sink.broadcast_milestone(completed);
            }
            Ok(false) => {
                tracing::debug!(completed, "Milestone already announced");
            }
            Err(error) => {
                tracing::warn!(completed, "Skipped milestone announcement: {}", error);
            }
        }
    }

    /// Hands out the reward of a completed bundle.
    ///
    /// Only the first claim across all participants resolves items; later
    /// claims fail with [`RuntimeError::RewardAlreadyClaimed`].
    pub fn claim_reward(&self, bundle: &BundleId) -> Result<Vec<Item>> {
        if !self.is_complete(bundle)? {
            return Err(RuntimeError::BundleIncomplete(bundle.clone()));
        }
        let resolver = self.rewards.as_ref().ok_or(RuntimeError::ResolverNotSet)?;

        if !self.store.try_claim_reward(bundle)? {
            return Err(RuntimeError::RewardAlreadyClaimed(bundle.clone()));
        }

        let items = self
            .definitions
            .get(bundle)
            .and_then(|definition| definition.reward())
            .map(|reward| resolver.resolve(reward))
            .unwrap_or_default();

        tracing::info!(bundle = %bundle, items = items.len(), "Reward claimed");
        Ok(items)
    }
}

/// Builder for [`BundleBoard`] with flexible configuration.
pub struct BundleBoardBuilder {
    config: RuntimeConfig,
    definitions: Vec<BundleDefinition>,
    store: Option<Arc<dyn BundleRepository>>,
    sink: Option<Arc<dyn NotificationSink>>,
    rewards: Option<Arc<dyn RewardResolver>>,
    events: Option<EventBus>,
}

impl BundleBoardBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            definitions: Vec::new(),
            store: None,
            sink: None,
            rewards: None,
            events: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the engine configuration
    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    /// Add validated bundle definitions
    pub fn definitions(mut self, definitions: impl IntoIterator<Item = BundleDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Set the shared store (defaults to [`InMemoryBundleStore`])
    pub fn store(mut self, store: Arc<dyn BundleRepository>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the notification sink (defaults to [`NullSink`])
    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the reward resolver used by [`BundleBoard::claim_reward`]
    pub fn rewards(mut self, rewards: Arc<dyn RewardResolver>) -> Self {
        self.rewards = Some(rewards);
        self
    }

    /// Publish presentation events on `bus`
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Build the board, registering a store record for every bundle.
    ///
    /// Existing records are kept, so a reopened file store resumes where it
    /// left off.
    pub fn build(self) -> Result<BundleBoard> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryBundleStore::new()) as Arc<dyn BundleRepository>);

        let mut definitions = BTreeMap::new();
        for definition in self.definitions {
            let id = definition.id().clone();
            if definitions.contains_key(&id) {
                return Err(DefinitionError::DuplicateBundle(id).into());
            }
            store.register(&id, definition.slot_count())?;
            definitions.insert(id, Arc::new(definition));
        }

        tracing::info!(bundles = definitions.len(), "Bundle board ready");

        Ok(BundleBoard {
            config: self.config,
            definitions,
            store,
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(NullSink) as Arc<dyn NotificationSink>),
            rewards: self.rewards,
            events: self.events,
        })
    }
}
