//! One participant's open bundle views.

use std::collections::BTreeMap;
use std::sync::Arc;

use bundle_core::{Bundle, BundleEvent, BundleId, DepositResult, Item};

use crate::api::{Result, RuntimeError};
use crate::board::BundleBoard;

/// The views a single participant has open, keyed by bundle.
///
/// Views are transient. Closing one, or dropping the session, never undoes a
/// donation: the store already holds it.
pub struct ParticipantSession {
    board: Arc<BundleBoard>,
    participant: String,
    views: BTreeMap<BundleId, Bundle>,
}

impl ParticipantSession {
    pub(crate) fn new(board: Arc<BundleBoard>, participant: impl Into<String>) -> Self {
        Self {
            board,
            participant: participant.into(),
            views: BTreeMap::new(),
        }
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn board(&self) -> &BundleBoard {
        &self.board
    }

    pub fn view(&self, bundle: &BundleId) -> Option<&Bundle> {
        self.views.get(bundle)
    }

    pub fn open_bundles(&self) -> impl Iterator<Item = &BundleId> {
        self.views.keys()
    }

    /// Opens a view of `bundle`, replacing any view already open for it.
    pub fn open(&mut self, bundle: &BundleId, deposits_allowed: bool) -> Result<&Bundle> {
        let view = self.board.open_view(bundle, deposits_allowed)?;
        if let Some(previous) = self.views.insert(bundle.clone(), view)
            && previous.close()
        {
            tracing::debug!(bundle = %bundle, "Reopened view skipped a pending celebration");
        }
        self.views
            .get(bundle)
            .ok_or_else(|| RuntimeError::ViewNotOpen(bundle.clone()))
    }

    /// Donates `item` into the open view of `bundle`.
    pub fn deposit(&mut self, bundle: &BundleId, item: Item) -> Result<DepositResult> {
        let view = self
            .views
            .get_mut(bundle)
            .ok_or_else(|| RuntimeError::ViewNotOpen(bundle.clone()))?;
        Ok(self.board.deposit(view, item, &self.participant))
    }

    /// Drives every open view's completion timer.
    ///
    /// Returns the celebration cues that fired during this tick.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<BundleEvent> {
        let events: Vec<BundleEvent> = self
            .views
            .values_mut()
            .filter_map(|view| view.advance(elapsed_ms))
            .collect();

        for event in &events {
            tracing::info!(
                bundle = %event.bundle(),
                participant = %self.participant,
                "Celebration started"
            );
        }
        self.board.publish(&events);
        events
    }

    /// Closes the view of `bundle`.
    ///
    /// Returns true if a pending celebration was skipped. The bundle's
    /// completion itself is already durable.
    pub fn close(&mut self, bundle: &BundleId) -> Result<bool> {
        let view = self
            .views
            .remove(bundle)
            .ok_or_else(|| RuntimeError::ViewNotOpen(bundle.clone()))?;
        Ok(view.close())
    }
}
