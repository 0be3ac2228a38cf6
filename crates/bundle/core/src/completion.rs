//! Completion state machine embedded in every bundle view.
//!
//! ```text
//!   Open ──(live donation completes)──▶ PendingCompletion ──(timer elapsed)──▶ Complete
//!     │                                         │
//!     └──────(loaded / resynced complete)───────┴──────(view torn down)───────▶ Complete
//! ```
//!
//! Only the timer path emits a [`CompletionCue`], and at most once. Loading an
//! already complete bundle, observing another participant's completion, or
//! tearing a pending view down all reach `Complete` silently. The logical
//! completion is durable in the store either way; only presentation differs.

/// Current phase of a bundle view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompletionState {
    /// Accepting donations toward completion.
    Open,
    /// All required slots are filled; the celebration waits on the timer.
    PendingCompletion { remaining_ms: u64 },
    /// Terminal.
    Complete,
}

/// One-shot signal that the celebration sequence should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionCue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionStateMachine {
    state: CompletionState,
    celebrated: bool,
}

impl CompletionStateMachine {
    /// Machine for a bundle that still needs donations.
    pub fn open() -> Self {
        Self {
            state: CompletionState::Open,
            celebrated: false,
        }
    }

    /// Machine for a bundle found complete when the view opened. Never celebrates.
    pub fn loaded_complete() -> Self {
        Self {
            state: CompletionState::Complete,
            celebrated: false,
        }
    }

    pub fn state(&self) -> CompletionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, CompletionState::PendingCompletion { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, CompletionState::Complete)
    }

    /// True once the celebration cue has been emitted.
    pub fn has_celebrated(&self) -> bool {
        self.celebrated
    }

    /// Starts the countdown after a live donation completed the bundle.
    ///
    /// Returns false (and does nothing) unless the machine is `Open`.
    pub fn begin(&mut self, delay_ms: u64) -> bool {
        if self.state != CompletionState::Open {
            return false;
        }
        self.state = CompletionState::PendingCompletion {
            remaining_ms: delay_ms,
        };
        true
    }

    /// Marks completion discovered from the store rather than from a donation.
    pub fn resync(&mut self) {
        if self.state == CompletionState::Open {
            self.state = CompletionState::Complete;
        }
    }

    /// Advances the countdown. Emits the cue exactly when the timer runs out.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<CompletionCue> {
        let CompletionState::PendingCompletion { remaining_ms } = self.state else {
            return None;
        };

        let remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
        if remaining_ms > 0 {
            self.state = CompletionState::PendingCompletion { remaining_ms };
            return None;
        }

        self.state = CompletionState::Complete;
        if self.celebrated {
            return None;
        }
        self.celebrated = true;
        Some(CompletionCue)
    }

    /// Tears the view down. A pending celebration is dropped, the completion is not.
    ///
    /// Returns true if a celebration was skipped.
    pub fn abandon(&mut self) -> bool {
        if self.is_pending() {
            self.state = CompletionState::Complete;
            return true;
        }
        false
    }
}

impl Default for CompletionStateMachine {
    fn default() -> Self {
        Self::open()
    }
}
