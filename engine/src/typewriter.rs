//! Rotating role text: type a role out, hold it, delete it, move to the next.
//!
//! A single [`TimerSlot`] drives all three phases. Every displayed-string
//! change re-arms it exactly once, and ticks are rescheduled from their due
//! time so a late [`TypewriterCycler::advance`] replays the exact frames.

use std::time::Duration;

use thiserror::Error;

use awaken_types::{NonEmptyString, TimerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub hold: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(100),
            delete_interval: Duration::from_millis(50),
            hold: Duration::from_millis(2_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    #[error("typewriter needs at least one role")]
    NoRoles,
    #[error("typewriter {0} interval must be positive")]
    ZeroInterval(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

#[derive(Debug)]
pub struct TypewriterCycler {
    roles: Vec<Vec<String>>,
    index: usize,
    shown: usize,
    phase: Phase,
    tick: TimerSlot<Phase>,
    config: TypewriterConfig,
}

impl TypewriterCycler {
    pub fn new(
        roles: Vec<NonEmptyString>,
        config: TypewriterConfig,
    ) -> Result<Self, TypewriterError> {
        if roles.is_empty() {
            return Err(TypewriterError::NoRoles);
        }
        for (phase, interval) in [
            ("type", config.type_interval),
            ("delete", config.delete_interval),
            ("hold", config.hold),
        ] {
            if interval.is_zero() {
                return Err(TypewriterError::ZeroInterval(phase));
            }
        }
        let roles = roles
            .iter()
            .map(|role| role.graphemes().into_iter().map(str::to_owned).collect())
            .collect();
        Ok(Self {
            roles,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            tick: TimerSlot::new(),
            config,
        })
    }

    /// Start (or resume) the animation from the current frame.
    pub fn start(&mut self, now: Duration) {
        if self.tick.is_armed() {
            return;
        }
        let delay = self.delay_for(self.phase);
        self.tick.arm(now, delay, self.phase);
    }

    /// Cancel the pending tick. The current text stays as it is.
    pub fn stop(&mut self) {
        self.tick.cancel();
    }

    /// Restart from an empty first role.
    pub fn reset(&mut self, now: Duration) {
        self.index = 0;
        self.shown = 0;
        self.phase = Phase::Typing;
        self.tick.cancel();
        self.start(now);
    }

    /// Run every tick due by `now`; returns each displayed string in order.
    pub fn advance(&mut self, now: Duration) -> Vec<String> {
        let mut frames = Vec::new();
        while let Some(fired) = self.tick.fire(now) {
            if fired.event != self.phase {
                continue;
            }
            if let Some(frame) = self.step(fired.due) {
                frames.push(frame);
            }
        }
        frames
    }

    fn step(&mut self, at: Duration) -> Option<String> {
        let role_len = self.roles[self.index].len();
        match self.phase {
            Phase::Typing => {
                self.shown += 1;
                if self.shown >= role_len {
                    self.shown = role_len;
                    self.phase = Phase::Holding;
                }
                self.rearm(at);
                Some(self.text())
            }
            Phase::Holding => {
                self.phase = Phase::Deleting;
                self.rearm(at);
                None
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.index = (self.index + 1) % self.roles.len();
                    self.phase = Phase::Typing;
                }
                self.rearm(at);
                Some(self.text())
            }
        }
    }

    fn rearm(&mut self, at: Duration) {
        let delay = self.delay_for(self.phase);
        self.tick.arm(at, delay, self.phase);
    }

    fn delay_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Typing => self.config.type_interval,
            Phase::Holding => self.config.hold,
            Phase::Deleting => self.config.delete_interval,
        }
    }

    /// The partially typed role currently on screen.
    #[must_use]
    pub fn text(&self) -> String {
        self.roles[self.index][..self.shown].concat()
    }

    #[must_use]
    pub fn role_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_armed()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tick.deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.tick.pending_count()
    }
}
