//! Single-slot transient notification.
//!
//! The slot shows at most one message. `show` overwrites whatever is visible
//! and restarts the countdown; nothing is queued.
//!
//! The slot owns its countdown. The progress indicator and the dismiss timer
//! are both derived from the same [`EffectTimer`], so the bar reaches empty on
//! exactly the tick the message disappears.

use std::time::Duration;

use awaken_types::ui::{EffectTimer, Icon, NotificationState};
use awaken_types::{NonEmptyString, TimerId, TimerSlot};

#[derive(Debug, Clone)]
struct Shown {
    message: NonEmptyString,
    icon: Icon,
    countdown: EffectTimer,
}

#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Shown>,
    dismiss: TimerSlot<()>,
}

impl NotificationSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `duration`, replacing anything currently visible.
    pub fn show(
        &mut self,
        now: Duration,
        message: NonEmptyString,
        icon: Icon,
        duration: Duration,
    ) -> TimerId {
        if let Some(previous) = &self.current {
            tracing::debug!(replaced = %previous.message, "notification overwritten");
        }
        tracing::debug!(%message, ?duration, "notification shown");
        self.current = Some(Shown {
            message,
            icon,
            countdown: EffectTimer::new(now, duration),
        });
        self.dismiss.arm(now, duration, ())
    }

    /// Hide immediately and cancel the countdown.
    pub fn hide(&mut self) {
        self.dismiss.cancel();
        self.current = None;
    }

    /// Apply the countdown. Returns `true` if the notification was dismissed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.dismiss.fire(now).is_some() {
            self.current = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn state(&self) -> NotificationState {
        match &self.current {
            Some(shown) => NotificationState {
                visible: true,
                message: shown.message.to_string(),
                icon: shown.icon.clone(),
                since: shown.countdown.started(),
            },
            None => NotificationState::hidden(),
        }
    }

    /// Progress indicator fill, `1.0` when shown and `0.0` when hidden.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> f32 {
        self.current
            .as_ref()
            .map_or(0.0, |shown| shown.countdown.remaining(now))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.dismiss.deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.dismiss.pending_count()
    }
}
