use std::time::Duration;

/// Where an animation is in its run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// A fixed-length animation anchored on the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTimer {
    started: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(started: Duration, duration: Duration) -> Self {
        Self { started, duration }
    }

    #[must_use]
    pub fn started(&self) -> Duration {
        self.started
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn ends_at(&self) -> Duration {
        self.started.saturating_add(self.duration)
    }

    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        normalized_progress(now.saturating_sub(self.started), self.duration)
    }

    /// Fraction still to run, `1.0` at start and `0.0` once finished.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> f32 {
        1.0 - self.progress(now)
    }

    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.ends_at()
    }

    #[must_use]
    pub fn phase(&self, now: Duration) -> AnimPhase {
        if self.is_finished(now) {
            AnimPhase::Completed
        } else {
            AnimPhase::Running {
                progress: self.progress(now),
            }
        }
    }
}
