//! Cancellable delayed events on a virtual clock.
//!
//! Every component in the engine schedules its delays through a [`TimerSlot`].
//! Time is the elapsed [`Duration`] since the owning session started; the
//! runtime maps wall-clock time onto it and tests drive it directly.
//!
//! A slot holds at most one pending event. Arming replaces (and thereby
//! cancels) whatever was pending, so a superseded event can never be
//! delivered.

use std::time::Duration;

use crate::TimerId;

#[derive(Debug, Clone)]
struct Pending<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// An event whose deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    pub id: TimerId,
    /// When the event was scheduled to fire. Reschedule relative to this, not
    /// to "now", so a late clock advance replays the same sequence.
    pub due: Duration,
    pub event: E,
}

/// Single-pending cancellable timer.
#[derive(Debug, Clone)]
pub struct TimerSlot<E> {
    pending: Option<Pending<E>>,
    issued: u64,
}

impl<E> Default for TimerSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerSlot<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            issued: 0,
        }
    }

    /// Schedule `event` to fire `delay` after `now`, cancelling any pending event.
    pub fn arm(&mut self, now: Duration, delay: Duration, event: E) -> TimerId {
        self.issued += 1;
        let id = TimerId::new(self.issued);
        self.pending = Some(Pending {
            id,
            due: now.saturating_add(delay),
            event,
        });
        id
    }

    /// Cancel the pending event. Returns its id if one was pending.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|pending| pending.id)
    }

    /// Take the pending event if its deadline is at or before `now`.
    pub fn fire(&mut self, now: Duration) -> Option<Fired<E>> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| Fired {
                id: p.id,
                due: p.due,
                event: p.event,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    #[must_use]
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Number of pending events (0 or 1).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        usize::from(self.pending.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::TimerSlot;
    use std::time::Duration;

    const fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_only_at_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(ms(0), ms(100), "tick");
        assert!(slot.fire(ms(99)).is_none());
        let fired = slot.fire(ms(100)).unwrap();
        assert_eq!(fired.event, "tick");
        assert_eq!(fired.due, ms(100));
        assert!(!slot.is_armed());
    }

    #[test]
    fn rearm_supersedes_pending_event() {
        let mut slot = TimerSlot::new();
        let first = slot.arm(ms(0), ms(50), 1);
        let second = slot.arm(ms(10), ms(100), 2);
        assert_ne!(first, second);

        assert!(slot.fire(ms(60)).is_none());
        let fired = slot.fire(ms(110)).unwrap();
        assert_eq!(fired.id, second);
        assert_eq!(fired.event, 2);
    }

    #[test]
    fn cancelled_event_never_fires() {
        let mut slot = TimerSlot::new();
        let id = slot.arm(ms(0), ms(10), ());
        assert_eq!(slot.cancel(), Some(id));
        assert!(slot.fire(ms(1_000)).is_none());
        assert_eq!(slot.pending_count(), 0);
        assert_eq!(slot.cancel(), None);
    }

    #[test]
    fn deadline_saturates() {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::MAX, ms(1), ());
        assert_eq!(slot.deadline(), Some(Duration::MAX));
    }
}
