//! Auto-advancing carousel with a one-way manual-override latch.

use std::time::Duration;

use thiserror::Error;

use awaken_types::TimerSlot;
use awaken_types::ui::CarouselState;

pub const DEFAULT_ADVANCE_INTERVAL: Duration = Duration::from_millis(6_000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("slide {index} out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug)]
pub struct CarouselController {
    len: usize,
    state: CarouselState,
    interval: Duration,
    advance: TimerSlot<()>,
}

impl CarouselController {
    /// Mount a carousel over `len` items. Auto-play starts immediately unless
    /// `interval` is zero, which disables it.
    #[must_use]
    pub fn new(now: Duration, len: usize, interval: Duration) -> Self {
        let auto_playing = len > 0 && !interval.is_zero();
        let mut advance = TimerSlot::new();
        if auto_playing {
            advance.arm(now, interval, ());
        }
        Self {
            len,
            state: CarouselState {
                index: 0,
                auto_playing,
            },
            interval,
            advance,
        }
    }

    /// `None` for an empty carousel, which renders nothing.
    #[must_use]
    pub fn state(&self) -> Option<CarouselState> {
        (self.len > 0).then_some(self.state)
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.state().map(|state| state.index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[allow(clippy::should_implement_trait)] // Not an iterator: navigation trips the latch
    pub fn next(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.latch();
        self.state.index = (self.state.index + 1) % self.len;
        Some(self.state.index)
    }

    pub fn previous(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.latch();
        self.state.index = (self.state.index + self.len - 1) % self.len;
        Some(self.state.index)
    }

    pub fn select_index(&mut self, index: usize) -> Result<usize, CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.latch();
        self.state.index = index;
        Ok(index)
    }

    /// Run due auto-advance ticks. Returns the index after each advance.
    pub fn advance(&mut self, now: Duration) -> Vec<usize> {
        let mut advanced = Vec::new();
        while let Some(fired) = self.advance.fire(now) {
            if !self.state.auto_playing {
                break;
            }
            self.state.index = (self.state.index + 1) % self.len;
            advanced.push(self.state.index);
            self.advance.arm(fired.due, self.interval, ());
        }
        advanced
    }

    fn latch(&mut self) {
        if self.state.auto_playing {
            tracing::debug!(index = self.state.index, "carousel auto-play latched off");
        }
        self.state.auto_playing = false;
        self.advance.cancel();
    }

    /// Cancel auto-play without counting as a manual interaction.
    pub fn stop(&mut self) {
        self.advance.cancel();
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.advance.deadline()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.advance.pending_count()
    }
}
