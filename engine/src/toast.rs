//! Severity toast with an exit animation.
//!
//! Unlike [`NotificationSlot`](crate::NotificationSlot), a toast can be
//! dismissed by the visitor. Both manual and automatic dismissal play the exit
//! animation first; the toast stays mounted until that finishes and only then
//! reports [`ToastEvent::Hidden`].

use std::time::Duration;

use awaken_types::ui::{AnimPhase, EffectTimer, ToastLevel};
use awaken_types::{NonEmptyString, TimerSlot};

pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    /// The exit animation began.
    Exiting,
    /// The exit animation finished; the toast can leave the render tree.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToastTimer {
    AutoDismiss,
    ExitFinished,
}

#[derive(Debug, Clone)]
enum Phase {
    Hidden,
    Visible { countdown: EffectTimer },
    Exiting { exit: EffectTimer },
}

#[derive(Debug, Clone)]
pub struct Toast {
    message: Option<NonEmptyString>,
    level: ToastLevel,
    phase: Phase,
    timer: TimerSlot<ToastTimer>,
    exit_duration: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_DURATION)
    }
}

impl Toast {
    #[must_use]
    pub fn new(exit_duration: Duration) -> Self {
        Self {
            message: None,
            level: ToastLevel::default(),
            phase: Phase::Hidden,
            timer: TimerSlot::new(),
            exit_duration,
        }
    }

    /// Show a toast, replacing the current one. Cancels a running exit.
    pub fn show(
        &mut self,
        now: Duration,
        message: NonEmptyString,
        level: ToastLevel,
        duration: Duration,
    ) {
        tracing::debug!(%message, level = level.as_str(), "toast shown");
        self.message = Some(message);
        self.level = level;
        self.phase = Phase::Visible {
            countdown: EffectTimer::new(now, duration),
        };
        self.timer.arm(now, duration, ToastTimer::AutoDismiss);
    }

    /// Visitor dismissal. No-op unless the toast is fully visible.
    pub fn dismiss(&mut self, now: Duration) -> Option<ToastEvent> {
        if matches!(self.phase, Phase::Visible { .. }) {
            self.begin_exit(now);
            Some(ToastEvent::Exiting)
        } else {
            None
        }
    }

    pub fn advance(&mut self, now: Duration) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timer.fire(now) {
            match fired.event {
                ToastTimer::AutoDismiss => {
                    self.begin_exit(fired.due);
                    events.push(ToastEvent::Exiting);
                }
                ToastTimer::ExitFinished => {
                    self.phase = Phase::Hidden;
                    self.message = None;
                    events.push(ToastEvent::Hidden);
                }
            }
        }
        events
    }

    fn begin_exit(&mut self, at: Duration) {
        self.phase = Phase::Exiting {
            exit: EffectTimer::new(at, self.exit_duration),
        };
        self.timer
            .arm(at, self.exit_duration, ToastTimer::ExitFinished);
    }

    /// Whether the toast element must stay in the render tree.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Hidden)
    }

    #[must_use]
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn level(&self) -> ToastLevel {
        self.level
    }

    /// Countdown bar fill while visible.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> f32 {
        match &self.phase {
            Phase::Visible { countdown } => countdown.remaining(now),
            Phase::Exiting { .. } | Phase::Hidden => 0.0,
        }
    }

    /// Exit animation phase, if exiting.
    #[must_use]
    pub fn exit_phase(&self, now: Duration) -> Option<AnimPhase> {
        match &self.phase {
            Phase::Exiting { exit } => Some(exit.phase(now)),
            Phase::Visible { .. } | Phase::Hidden => None,
        }
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timer.pending_count()
    }

    /// Drop the toast immediately, skipping the exit animation.
    pub fn clear(&mut self) {
        self.timer.cancel();
        self.phase = Phase::Hidden;
        self.message = None;
    }
}
