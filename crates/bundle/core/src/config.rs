/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Pause between the donation that completes a bundle and its celebration cue.
    pub completion_delay_ms: u64,

    /// Accept donations whose stack is smaller than the criterion requires.
    /// The whole stack is consumed in that case.
    pub ignore_stack_count: bool,

    /// Completed-bundle counts that trigger a milestone broadcast.
    pub milestones: Vec<usize>,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 800;

    pub fn new() -> Self {
        Self {
            completion_delay_ms: Self::DEFAULT_COMPLETION_DELAY_MS,
            ignore_stack_count: false,
            milestones: Vec::new(),
        }
    }

    pub fn with_completion_delay(completion_delay_ms: u64) -> Self {
        Self {
            completion_delay_ms,
            ..Self::new()
        }
    }

    /// Returns true if reaching `completed` bundles should be broadcast.
    pub fn is_milestone(&self, completed: usize) -> bool {
        self.milestones.contains(&completed)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
