use awaken_types::{ProgressionError, ProgressionState};

/// Result of one `add_experience` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceGain {
    pub leveled_up: bool,
    pub levels_gained: u64,
    pub state: ProgressionState,
}

/// Owns the profile's level and experience counters.
///
/// Side-effect free: callers decide whether a level-up plays a sound or shows
/// a notification.
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine {
    state: ProgressionState,
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(state: ProgressionState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> ProgressionState {
        self.state
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        self.state.level()
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.state.xp()
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    /// Add experience. A zero amount is rejected and changes nothing.
    pub fn add_experience(&mut self, amount: u64) -> Result<ExperienceGain, ProgressionError> {
        let (next, levels_gained) = self.state.gain(amount)?;
        tracing::debug!(
            amount,
            from_level = self.state.level(),
            to_level = next.level(),
            xp = next.xp(),
            "experience added"
        );
        self.state = next;
        Ok(ExperienceGain {
            leveled_up: levels_gained > 0,
            levels_gained,
            state: next,
        })
    }
}
